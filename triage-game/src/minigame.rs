//! Bridge between minigame front-ends and the scenario resolver.
//!
//! A minigame only reports how it ended. The core turns that report into the
//! same [`ScenarioOutcome`] a triage choice produces.
use serde::{Deserialize, Serialize};

use crate::constants::{
    MINIGAME_FAILURE_LABEL, MINIGAME_FAILURE_MORALE, MINIGAME_FAILURE_QUALITY,
    MINIGAME_SUCCESS_LABEL, MINIGAME_SUCCESS_MORALE, MINIGAME_SUCCESS_QUALITY,
};
use crate::data::{Scenario, ScenarioKind};
use crate::journey::ScenarioOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinigameReport {
    Success(bool),
    Detailed {
        quality_change: i32,
        morale_change: i32,
        outcome_text: String,
        is_correct: bool,
        selected_label: String,
    },
}

impl MinigameReport {
    /// Resolve the report against the scenario it was played for.
    ///
    /// A bare success flag borrows the scenario's authored correct (or first
    /// incorrect) option when there is one, and falls back to fixed deltas
    /// and the scenario's success/failure message otherwise.
    #[must_use]
    pub fn into_outcome(self, scenario: &Scenario) -> ScenarioOutcome {
        match self {
            Self::Detailed {
                quality_change,
                morale_change,
                outcome_text,
                is_correct,
                selected_label,
            } => ScenarioOutcome {
                selected_label,
                quality_change,
                morale_change,
                outcome_text,
                is_correct,
            },
            Self::Success(won) => {
                let authored = scenario.options.iter().find(|opt| opt.is_correct == won);
                if let Some(option) = authored {
                    return ScenarioOutcome::from_option(option);
                }
                if won {
                    ScenarioOutcome {
                        selected_label: MINIGAME_SUCCESS_LABEL.to_string(),
                        quality_change: MINIGAME_SUCCESS_QUALITY,
                        morale_change: MINIGAME_SUCCESS_MORALE,
                        outcome_text: scenario.success_message.clone().unwrap_or_default(),
                        is_correct: true,
                    }
                } else {
                    ScenarioOutcome {
                        selected_label: MINIGAME_FAILURE_LABEL.to_string(),
                        quality_change: MINIGAME_FAILURE_QUALITY,
                        morale_change: MINIGAME_FAILURE_MORALE,
                        outcome_text: scenario.failure_message.clone().unwrap_or_default(),
                        is_correct: false,
                    }
                }
            }
        }
    }
}

/// Tuning a front-end reads to size a minigame for the scenario's difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinigameParams {
    pub difficulty: u32,
    /// Puzzle grid edge, memory sequence length or scrambled word length.
    pub size: u32,
    pub time_limit_ms: u64,
    pub attempts: u32,
}

impl MinigameParams {
    /// `None` for triage scenarios, which are resolved by choosing an option.
    #[must_use]
    pub fn for_scenario(scenario: &Scenario) -> Option<Self> {
        if !scenario.kind.is_minigame() {
            return None;
        }
        let difficulty = scenario.difficulty();
        let size = match scenario.kind {
            ScenarioKind::Decrypt => scenario
                .target_word
                .as_deref()
                .map_or(difficulty + 3, |word| {
                    u32::try_from(word.chars().count()).unwrap_or(u32::MAX)
                }),
            ScenarioKind::Memory => difficulty + 3,
            ScenarioKind::Puzzle => difficulty + 2,
            _ => difficulty + 1,
        };
        let base_ms: u64 = match scenario.kind {
            ScenarioKind::Reflex => 3_000,
            _ => 60_000,
        };
        let time_limit_ms = base_ms / u64::from(difficulty);
        Some(Self {
            difficulty,
            size,
            time_limit_ms,
            attempts: 4u32.saturating_sub(difficulty).max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContentCatalog;

    fn catalog() -> ContentCatalog {
        ContentCatalog::load_from_static().unwrap()
    }

    #[test]
    fn success_flag_uses_authored_options() {
        let catalog = catalog();
        let scenario = catalog.scenario("act3_3").unwrap();
        let win = MinigameReport::Success(true).into_outcome(scenario);
        assert!(win.is_correct);
        assert_eq!(win.selected_label, scenario.correct_option().unwrap().label);

        let loss = MinigameReport::Success(false).into_outcome(scenario);
        assert!(!loss.is_correct);
        assert_ne!(loss.selected_label, win.selected_label);
    }

    #[test]
    fn success_flag_falls_back_without_options() {
        let catalog = catalog();
        let scenario = catalog.scenario("act1_3").unwrap();
        assert!(scenario.options.is_empty());

        let win = MinigameReport::Success(true).into_outcome(scenario);
        assert_eq!(win.quality_change, 10);
        assert_eq!(win.morale_change, 5);
        assert_eq!(
            Some(win.outcome_text.as_str()),
            scenario.success_message.as_deref()
        );

        let loss = MinigameReport::Success(false).into_outcome(scenario);
        assert_eq!(loss.quality_change, -10);
        assert_eq!(loss.morale_change, -5);
        assert!(!loss.is_correct);
    }

    #[test]
    fn detailed_reports_pass_through() {
        let catalog = catalog();
        let scenario = catalog.scenario("act2_4").unwrap();
        let outcome = MinigameReport::Detailed {
            quality_change: 7,
            morale_change: -2,
            outcome_text: "close call".to_string(),
            is_correct: true,
            selected_label: "sequence".to_string(),
        }
        .into_outcome(scenario);
        assert_eq!(outcome.quality_change, 7);
        assert_eq!(outcome.morale_change, -2);
        assert_eq!(outcome.selected_label, "sequence");
    }

    #[test]
    fn params_scale_with_difficulty() {
        let catalog = catalog();
        assert!(MinigameParams::for_scenario(catalog.scenario("act1_1").unwrap()).is_none());

        let puzzle = MinigameParams::for_scenario(catalog.scenario("act1_3").unwrap()).unwrap();
        let decrypt = MinigameParams::for_scenario(catalog.scenario("act2_3").unwrap()).unwrap();
        assert_eq!(puzzle.difficulty, 1);
        assert_eq!(decrypt.difficulty, 2);
        assert_eq!(decrypt.size, 8);
        assert!(decrypt.time_limit_ms < puzzle.time_limit_ms);
        assert!(decrypt.attempts <= puzzle.attempts);
    }
}
