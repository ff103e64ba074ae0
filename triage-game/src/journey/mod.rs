//! Scenario resolution and the act/scene state machine.
//!
//! Every function here takes a [`GameState`] by value and returns the next
//! snapshot. Unknown ids and calls against a finished run are logged through
//! the `log` facade and leave the state unchanged.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    LOG_ACT_MISMATCH, LOG_ACT2_START, LOG_ACT3_LOCKED, LOG_ACT3_START, LOG_CHOICE, LOG_GAME_OVER,
    LOG_LOCATION_EMPTY, LOG_LOCATION_ENTERED, LOG_LOCATION_LOCKED, LOG_OUTCOME_CORRECT,
    LOG_OUTCOME_WRONG, LOG_SCENARIO_START, LOG_SKILL_BAD, LOG_SKILL_CLEARED, LOG_SKILL_EMPTY,
    LOG_SKILL_EQUIPPED, LOG_SKILL_MISUSED, LOG_SKILL_USED, LOG_VICTORY,
};
use crate::context::GameContext;
use crate::data::{Act, Scenario, ScenarioOption};
use crate::endgame::{GameOverCheck, check_stats};
use crate::progression::{
    mark_scenario_completed, record_wrong_answer, unlock_location, unlock_skill,
};
use crate::skills::SkillUse;
use crate::state::{GameState, GameStatus, Screen, Speaker};
use crate::stats::StatKind;
use crate::transition::begin_scene;

pub mod act;
pub mod action;
pub mod session;

pub use act::{ActStep, missing_core, plan};
pub use action::{Action, reduce};
pub use session::{GameSession, Subscriber};

/// Ids granted by a single progression step; acts unlock one or two of each.
pub type UnlockList = SmallVec<[String; 2]>;

/// What the player's decision did, independent of how it was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub selected_label: String,
    pub quality_change: i32,
    pub morale_change: i32,
    pub outcome_text: String,
    pub is_correct: bool,
}

impl ScenarioOutcome {
    #[must_use]
    pub fn from_option(option: &ScenarioOption) -> Self {
        Self {
            selected_label: option.label.clone(),
            quality_change: option.quality_change,
            morale_change: option.morale_change,
            outcome_text: option.outcome.clone(),
            is_correct: option.is_correct,
        }
    }
}

/// Progression side of a resolved scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressionEvent {
    /// The run was already over; nothing was applied.
    Ignored,
    GameOver,
    EnteredAct { act: Act },
    BossLocked { missing: Vec<String> },
    Victory,
    ActMismatch { scenario_act: Act, current_act: Act },
    Continue,
}

/// Full result of [`apply_scenario_outcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActTransition {
    pub state: GameState,
    pub game_over: GameOverCheck,
    pub event: ProgressionEvent,
    pub unlocked_locations: UnlockList,
    pub unlocked_skills: UnlockList,
    /// Scene transition opened by this step, if any.
    pub scene: Option<u64>,
}

impl ActTransition {
    fn unchanged(state: GameState, event: ProgressionEvent) -> Self {
        let game_over = check_stats(&state.stats);
        Self {
            state,
            game_over,
            event,
            unlocked_locations: UnlockList::new(),
            unlocked_skills: UnlockList::new(),
            scene: None,
        }
    }

    #[must_use]
    pub const fn next_act(&self) -> Act {
        self.state.act
    }

    #[must_use]
    pub const fn next_screen(&self) -> Screen {
        self.state.screen
    }
}

/// Mark the run lost if any stat is depleted.
pub(crate) fn settle_game_over(state: &mut GameState) -> GameOverCheck {
    let check = check_stats(&state.stats);
    if check.is_game_over && state.status.is_active() {
        state.status = GameStatus::Lost;
        state.screen = Screen::GameOver;
        state.game_over_reason = check.reason;
        state.current_scenario = None;
        state.transition = None;
        let detail = check.reason.map(|reason| reason.key().to_string());
        state.push_log(Speaker::System, LOG_GAME_OVER, detail);
        log::info!("run lost: {:?}", check.reason);
    }
    check
}

/// Apply a resolved scenario: base SLA cost, outcome deltas, completion and
/// wrong-answer bookkeeping, the game-over check, and act progression.
///
/// A depleted stat ends the run before any progression is considered. A
/// scenario from another act still costs and scores, but unlocks nothing.
#[must_use]
pub fn apply_scenario_outcome(
    state: GameState,
    ctx: &GameContext,
    scenario: &Scenario,
    outcome: &ScenarioOutcome,
) -> ActTransition {
    if !state.status.is_active() {
        log::warn!(
            "ignoring outcome for {} on a finished run ({:?})",
            scenario.id,
            state.status
        );
        return ActTransition::unchanged(state, ProgressionEvent::Ignored);
    }

    let mut state = state;
    state.stats = state
        .stats
        .with_delta(StatKind::Sla, -ctx.rules.base_sla_cost)
        .with_delta(StatKind::Morale, outcome.morale_change)
        .with_delta(StatKind::Quality, outcome.quality_change);
    state.turn += 1;
    state.push_log(
        Speaker::Player,
        LOG_CHOICE,
        Some(outcome.selected_label.clone()),
    );
    let verdict = if outcome.is_correct {
        LOG_OUTCOME_CORRECT
    } else {
        LOG_OUTCOME_WRONG
    };
    state.push_log(Speaker::Gm, verdict, Some(outcome.outcome_text.clone()));

    let state = mark_scenario_completed(state, &scenario.id);
    let mut state = record_wrong_answer(state, scenario, outcome);

    let game_over = settle_game_over(&mut state);
    if game_over.is_game_over {
        return ActTransition {
            state,
            game_over,
            event: ProgressionEvent::GameOver,
            unlocked_locations: UnlockList::new(),
            unlocked_skills: UnlockList::new(),
            scene: None,
        };
    }

    let completed = state.completed_scenarios.clone();
    let step = plan(state.act, scenario, &completed, &ctx.rules.progression);
    let mut unlocked_locations = UnlockList::new();
    let mut unlocked_skills = UnlockList::new();
    let mut scene = None;
    let event = match &step {
        ActStep::Advance {
            to,
            unlocks,
            title_key,
            subtitle_key,
            ..
        } => {
            for id in &unlocks.locations {
                if !state.is_location_unlocked(id) {
                    unlocked_locations.push(id.clone());
                }
                state = unlock_location(state, id);
            }
            for id in &unlocks.skills {
                if !state.is_skill_unlocked(id) {
                    unlocked_skills.push(id.clone());
                }
                state = unlock_skill(state, id);
            }
            state.act = *to;
            let key = if *to == Act::Act3Boss {
                LOG_ACT3_START
            } else {
                LOG_ACT2_START
            };
            state.push_log(Speaker::System, key, None);
            scene = Some(begin_scene(&mut state, title_key, subtitle_key));
            ProgressionEvent::EnteredAct { act: *to }
        }
        ActStep::StillLocked { missing } => {
            state.push_log(Speaker::System, LOG_ACT3_LOCKED, Some(missing.join(",")));
            ProgressionEvent::BossLocked {
                missing: missing.iter().map(ToString::to_string).collect(),
            }
        }
        ActStep::Victory => {
            state.status = GameStatus::Won;
            state.act = Act::Act4Epilogue;
            state.transition = None;
            state.push_log(Speaker::System, LOG_VICTORY, None);
            log::info!("run won on turn {}", state.turn);
            ProgressionEvent::Victory
        }
        ActStep::Mismatch { scenario_act } => {
            log::warn!(
                "scenario {} belongs to {} but the story is in {}",
                scenario.id,
                scenario_act,
                state.act
            );
            state.push_log(
                Speaker::System,
                LOG_ACT_MISMATCH,
                Some(scenario_act.as_str().to_string()),
            );
            ProgressionEvent::ActMismatch {
                scenario_act: *scenario_act,
                current_act: state.act,
            }
        }
        ActStep::Stay => ProgressionEvent::Continue,
    };
    state.screen = step.screen();
    if state.screen == Screen::SkillSelect {
        // New act, new loadout.
        state.selected_skill = None;
    }
    state.current_scenario = None;
    state.selected_location = None;

    ActTransition {
        state,
        game_over,
        event,
        unlocked_locations,
        unlocked_skills,
        scene,
    }
}

/// Resolve the current scenario with the option at `option_index`.
///
/// No-op when no scenario is loaded or the index is out of range.
#[must_use]
pub fn resolve_scenario(state: GameState, ctx: &GameContext, option_index: usize) -> ActTransition {
    let Some(scenario) = active_scenario(&state, ctx) else {
        log::warn!("no active scenario to resolve");
        return ActTransition::unchanged(state, ProgressionEvent::Ignored);
    };
    let Some(option) = scenario.option(option_index) else {
        log::warn!(
            "scenario {} has no option at index {option_index}",
            scenario.id
        );
        return ActTransition::unchanged(state, ProgressionEvent::Ignored);
    };
    let outcome = ScenarioOutcome::from_option(option);
    apply_scenario_outcome(state, ctx, scenario, &outcome)
}

pub(crate) fn active_scenario<'a>(state: &GameState, ctx: &'a GameContext) -> Option<&'a Scenario> {
    state
        .current_scenario
        .as_deref()
        .and_then(|id| ctx.catalog.scenario(id))
}

/// One background SLA tick. Inert on menu screens and finished runs.
#[must_use]
pub fn tick_sla_decay(mut state: GameState, ctx: &GameContext) -> GameState {
    if !state.decay_armed() {
        return state;
    }
    state.stats = state
        .stats
        .with_delta(StatKind::Sla, -ctx.rules.decay.amount);
    settle_game_over(&mut state);
    state
}

/// Enter `location_id` on the map and load its next scenario.
///
/// Locked or not-yet-reachable locations are refused; a location with
/// nothing left to do this act gets a narrative "nothing here" line.
#[must_use]
pub fn select_location(mut state: GameState, ctx: &GameContext, location_id: &str) -> GameState {
    if !state.status.is_active() || state.screen != Screen::MapSelect {
        log::warn!("location selection outside the map ({})", state.screen);
        return state;
    }
    let Some(location) = ctx.catalog.location(location_id) else {
        log::warn!("unknown location {location_id}");
        return state;
    };
    if !state.is_location_unlocked(location_id) || !location.is_reachable_in(state.act) {
        state.push_log(
            Speaker::System,
            LOG_LOCATION_LOCKED,
            Some(location_id.to_string()),
        );
        return state;
    }
    state.selected_location = Some(location_id.to_string());
    state.push_log(
        Speaker::Player,
        LOG_LOCATION_ENTERED,
        Some(location_id.to_string()),
    );
    let next = ctx
        .catalog
        .scenario_for_location(location_id, state.act, &state.completed_scenarios)
        .map(|s| s.id.clone());
    match next {
        Some(id) => {
            state.push_log(Speaker::Gm, LOG_SCENARIO_START, Some(id.clone()));
            state.current_scenario = Some(id);
            state.screen = Screen::Game;
        }
        None => {
            state.push_log(
                Speaker::Gm,
                LOG_LOCATION_EMPTY,
                Some(location_id.to_string()),
            );
        }
    }
    state
}

/// Equip `skill_id` if it is unlocked and in stock, otherwise clear the slot.
#[must_use]
pub fn select_skill(mut state: GameState, skill_id: &str) -> GameState {
    if state.is_skill_unlocked(skill_id) && state.inventory.has(skill_id) {
        state.selected_skill = Some(skill_id.to_string());
        state.push_log(
            Speaker::Player,
            LOG_SKILL_EQUIPPED,
            Some(skill_id.to_string()),
        );
    } else {
        log::debug!("refusing to equip {skill_id}");
        state.selected_skill = None;
        state.push_log(
            Speaker::System,
            LOG_SKILL_CLEARED,
            Some(skill_id.to_string()),
        );
    }
    state
}

/// Clear the selected skill if it is no longer unlocked or in stock.
#[must_use]
pub fn validate_selected_skill(mut state: GameState) -> GameState {
    let stale = state
        .selected_skill
        .as_deref()
        .is_some_and(|id| !state.unlocked_skills.contains(id) || !state.inventory.has(id));
    if stale {
        state.selected_skill = None;
    }
    state
}

/// Use one charge of `skill_id`.
///
/// Applies the skill's quality and morale effects (negative for bad items)
/// and its SLA penalty when used outside its target act, then re-checks for
/// game over. Returns `None` alongside the unchanged state when the skill is
/// unknown, locked, out of stock, or the run is finished.
#[must_use]
pub fn consume_skill(
    mut state: GameState,
    ctx: &GameContext,
    skill_id: &str,
) -> (GameState, Option<SkillUse>) {
    if !state.status.is_active() {
        return (state, None);
    }
    let Some(skill) = ctx.catalog.skill(skill_id) else {
        log::warn!("unknown skill {skill_id}");
        return (state, None);
    };
    if !state.is_skill_unlocked(skill_id) {
        log::debug!("skill {skill_id} is still locked");
        return (state, None);
    }
    let Some(inventory) = state.inventory.clone().consumed(skill_id) else {
        state.push_log(Speaker::System, LOG_SKILL_EMPTY, Some(skill_id.to_string()));
        return (state, None);
    };
    state.inventory = inventory;

    let used = SkillUse::evaluate(skill, state.act);
    state.stats = state
        .stats
        .with_delta(StatKind::Quality, used.quality_delta)
        .with_delta(StatKind::Morale, used.morale_delta)
        .with_delta(StatKind::Sla, -used.sla_penalty);
    state.push_log(Speaker::Player, LOG_SKILL_USED, Some(skill_id.to_string()));
    if used.bad_item {
        state.push_log(Speaker::Gm, LOG_SKILL_BAD, Some(skill_id.to_string()));
    }
    if used.misused {
        state.push_log(
            Speaker::System,
            LOG_SKILL_MISUSED,
            Some(used.sla_penalty.to_string()),
        );
    }
    let mut state = validate_selected_skill(state);
    settle_game_over(&mut state);
    (state, Some(used))
}
