//! Act progression rules.
//!
//! Given the act the story is in and the scenario that was just completed,
//! decide where the story goes next. The decision is pure; applying it to a
//! state happens in [`super::apply_scenario_outcome`].
use std::collections::BTreeSet;

use crate::config::{ProgressionCfg, UnlockSet};
use crate::constants::{
    SCENE_ACT2_SUBTITLE, SCENE_ACT2_TITLE, SCENE_ACT3_SUBTITLE, SCENE_ACT3_TITLE,
};
use crate::data::{Act, Scenario};
use crate::state::Screen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActStep<'a> {
    /// Open the next act, grant its unlocks and show a titled scene.
    Advance {
        to: Act,
        unlocks: &'a UnlockSet,
        screen: Screen,
        title_key: &'static str,
        subtitle_key: &'static str,
    },
    /// Act 2 content done but the boss gate still has open scenarios.
    StillLocked { missing: Vec<&'a str> },
    /// Boss cleared.
    Victory,
    /// The scenario belongs to a different act than the story is in.
    Mismatch { scenario_act: Act },
    /// Nothing to progress; back to the map.
    Stay,
}

impl ActStep<'_> {
    /// Screen the player lands on after this step.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        match self {
            Self::Advance { screen, .. } => *screen,
            Self::Victory => Screen::Victory,
            Self::StillLocked { .. } | Self::Mismatch { .. } | Self::Stay => Screen::MapSelect,
        }
    }
}

/// Plan the progression step for `scenario` completed in act `current`.
///
/// `completed` must already include `scenario`. A scenario owned by another
/// act never progresses anything.
#[must_use]
pub fn plan<'a>(
    current: Act,
    scenario: &Scenario,
    completed: &'a BTreeSet<String>,
    rules: &'a ProgressionCfg,
) -> ActStep<'a> {
    if scenario.act != current {
        return ActStep::Mismatch {
            scenario_act: scenario.act,
        };
    }
    match current {
        Act::Act1Ticket if scenario.id == rules.act1_opener => ActStep::Advance {
            to: Act::Act2Perspective,
            unlocks: &rules.act2_unlocks,
            screen: Screen::SkillSelect,
            title_key: SCENE_ACT2_TITLE,
            subtitle_key: SCENE_ACT2_SUBTITLE,
        },
        Act::Act2Perspective => {
            let missing = missing_core(completed, rules);
            if missing.is_empty() {
                ActStep::Advance {
                    to: Act::Act3Boss,
                    unlocks: &rules.act3_unlocks,
                    screen: Screen::MapSelect,
                    title_key: SCENE_ACT3_TITLE,
                    subtitle_key: SCENE_ACT3_SUBTITLE,
                }
            } else {
                ActStep::StillLocked { missing }
            }
        }
        Act::Act3Boss if scenario.id == rules.boss_scenario => ActStep::Victory,
        _ => ActStep::Stay,
    }
}

/// Core act-2 scenarios not yet in `completed`.
#[must_use]
pub fn missing_core<'a>(completed: &BTreeSet<String>, rules: &'a ProgressionCfg) -> Vec<&'a str> {
    rules
        .act2_core
        .iter()
        .filter(|id| !completed.contains(id.as_str()))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContentCatalog;
    use crate::config::RulesConfig;

    fn setup() -> (ContentCatalog, RulesConfig) {
        (
            ContentCatalog::load_from_static().unwrap(),
            RulesConfig::default(),
        )
    }

    fn done(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn opener_advances_to_act_two() {
        let (catalog, rules) = setup();
        let opener = catalog.scenario("act1_1").unwrap();
        let completed = done(&["act1_1"]);
        let step = plan(Act::Act1Ticket, opener, &completed, &rules.progression);
        assert!(matches!(
            step,
            ActStep::Advance {
                to: Act::Act2Perspective,
                screen: Screen::SkillSelect,
                ..
            }
        ));
    }

    #[test]
    fn other_act_one_scenarios_stay() {
        let (catalog, rules) = setup();
        let side = catalog.scenario("act1_2").unwrap();
        let completed = done(&["act1_2"]);
        assert_eq!(
            plan(Act::Act1Ticket, side, &completed, &rules.progression),
            ActStep::Stay
        );
    }

    #[test]
    fn boss_gate_needs_both_core_scenarios() {
        let (catalog, rules) = setup();
        let first = catalog.scenario("act2_1").unwrap();
        let completed = done(&["act1_1", "act2_1"]);
        let step = plan(Act::Act2Perspective, first, &completed, &rules.progression);
        assert_eq!(step, ActStep::StillLocked {
            missing: vec!["act2_2"]
        });
        assert_eq!(step.screen(), Screen::MapSelect);

        let second = catalog.scenario("act2_2").unwrap();
        let completed = done(&["act1_1", "act2_2", "act2_1"]);
        let step = plan(Act::Act2Perspective, second, &completed, &rules.progression);
        assert!(matches!(step, ActStep::Advance {
            to: Act::Act3Boss,
            ..
        }));
    }

    #[test]
    fn boss_scenario_wins_and_mismatch_is_inert() {
        let (catalog, rules) = setup();
        let boss = catalog.scenario("act3_1").unwrap();
        let completed = done(&["act3_1"]);
        assert_eq!(
            plan(Act::Act3Boss, boss, &completed, &rules.progression),
            ActStep::Victory
        );
        assert_eq!(
            plan(Act::Act2Perspective, boss, &completed, &rules.progression),
            ActStep::Mismatch {
                scenario_act: Act::Act3Boss
            }
        );
    }
}
