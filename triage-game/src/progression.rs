//! Accumulating unlock and completion sets.
//!
//! Every helper takes the state by value and hands back the next snapshot.
//! Set operations are idempotent; the wrong-answer list only ever grows.
use crate::data::Scenario;
use crate::journey::ScenarioOutcome;
use crate::state::{GameState, WrongAnswer};

#[must_use]
pub fn unlock_location(mut state: GameState, id: &str) -> GameState {
    if !state.unlocked_locations.contains(id) {
        log::debug!("unlocking location {id}");
        state.unlocked_locations.insert(id.to_string());
    }
    state
}

#[must_use]
pub fn unlock_skill(mut state: GameState, id: &str) -> GameState {
    if !state.unlocked_skills.contains(id) {
        log::debug!("unlocking skill {id}");
        state.unlocked_skills.insert(id.to_string());
    }
    state
}

#[must_use]
pub fn mark_scenario_completed(mut state: GameState, scenario_id: &str) -> GameState {
    if !state.completed_scenarios.contains(scenario_id) {
        state.completed_scenarios.insert(scenario_id.to_string());
    }
    state
}

/// Append a review record when `outcome` was the wrong call.
///
/// Correct choices leave the list untouched. Repeated mistakes on the same
/// scenario are all kept.
#[must_use]
pub fn record_wrong_answer(
    mut state: GameState,
    scenario: &Scenario,
    outcome: &ScenarioOutcome,
) -> GameState {
    if !outcome.is_correct {
        state.wrong_answers.push(WrongAnswer::from_choice(
            scenario,
            &outcome.selected_label,
            &outcome.outcome_text,
        ));
    }
    state
}
