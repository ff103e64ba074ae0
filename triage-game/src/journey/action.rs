use serde::{Deserialize, Serialize};

use crate::constants::{LOG_CHARACTER_SELECTED, LOG_GAME_START, LOG_MAP_OPEN, LOG_PLAYER_NAMED};
use crate::context::GameContext;
use crate::minigame::MinigameReport;
use crate::state::{GameState, Screen, Speaker};
use crate::stats::Stats;

use super::{
    active_scenario, apply_scenario_outcome, consume_skill, resolve_scenario, select_location,
    select_skill, settle_game_over, tick_sla_decay, validate_selected_skill,
};

/// Everything a front-end can ask the game to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    StartGame,
    SetPlayerName(String),
    SelectCharacter(String),
    SelectSkill(String),
    ConfirmSkills,
    SelectLocation(String),
    ResolveScenario { option_index: usize },
    ReportMinigame(MinigameReport),
    ConsumeSkill(String),
    TickDecay,
    SetLoading(bool),
    Reset,
}

impl Action {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StartGame => "start_game",
            Self::SetPlayerName(_) => "set_player_name",
            Self::SelectCharacter(_) => "select_character",
            Self::SelectSkill(_) => "select_skill",
            Self::ConfirmSkills => "confirm_skills",
            Self::SelectLocation(_) => "select_location",
            Self::ResolveScenario { .. } => "resolve_scenario",
            Self::ReportMinigame(_) => "report_minigame",
            Self::ConsumeSkill(_) => "consume_skill",
            Self::TickDecay => "tick_decay",
            Self::SetLoading(_) => "set_loading",
            Self::Reset => "reset",
        }
    }
}

/// The reducer: `(state, action) -> state`.
///
/// Actions that do not apply to the current screen are logged and dropped.
/// The selected skill is re-validated after every step.
#[must_use]
pub fn reduce(state: GameState, ctx: &GameContext, action: Action) -> GameState {
    log::debug!("reduce {} on {}", action.name(), state.screen);
    let next = match action {
        Action::StartGame => start_game(state),
        Action::SetPlayerName(name) => set_player_name(state, &name),
        Action::SelectCharacter(id) => select_character(state, ctx, &id),
        Action::SelectSkill(id) => select_skill(state, &id),
        Action::ConfirmSkills => confirm_skills(state),
        Action::SelectLocation(id) => select_location(state, ctx, &id),
        Action::ResolveScenario { option_index } => {
            if state.screen == Screen::Game {
                resolve_scenario(state, ctx, option_index).state
            } else {
                log::warn!("resolve outside the game screen ({})", state.screen);
                state
            }
        }
        Action::ReportMinigame(report) => report_minigame(state, ctx, report),
        Action::ConsumeSkill(id) => consume_skill(state, ctx, &id).0,
        Action::TickDecay => tick_sla_decay(state, ctx),
        Action::SetLoading(loading) => GameState { loading, ..state },
        Action::Reset => GameState::new(ctx),
    };
    validate_selected_skill(next)
}

fn start_game(mut state: GameState) -> GameState {
    if state.screen != Screen::Intro {
        log::warn!("start requested from {}", state.screen);
        return state;
    }
    state.screen = Screen::CharSelect;
    state.push_log(Speaker::System, LOG_GAME_START, None);
    state
}

fn set_player_name(mut state: GameState, name: &str) -> GameState {
    let name = name.trim();
    if name.is_empty() || name == state.player_name {
        return state;
    }
    state.player_name = name.to_string();
    state.push_log(Speaker::Player, LOG_PLAYER_NAMED, Some(name.to_string()));
    state
}

fn select_character(mut state: GameState, ctx: &GameContext, id: &str) -> GameState {
    if state.screen != Screen::CharSelect {
        log::warn!("character selection outside the roster ({})", state.screen);
        return state;
    }
    let Some(character) = ctx.catalog.character(id) else {
        log::warn!("unknown character {id}");
        return state;
    };
    state.stats = Stats::from(character.start);
    state.character = Some(character.id.clone());
    state.screen = Screen::SkillSelect;
    state.push_log(
        Speaker::System,
        LOG_CHARACTER_SELECTED,
        Some(character.id.clone()),
    );
    settle_game_over(&mut state);
    state
}

fn confirm_skills(mut state: GameState) -> GameState {
    if state.screen != Screen::SkillSelect {
        log::warn!("skill confirmation outside skill select ({})", state.screen);
        return state;
    }
    state.screen = Screen::MapSelect;
    state.push_log(Speaker::System, LOG_MAP_OPEN, None);
    state
}

fn report_minigame(state: GameState, ctx: &GameContext, report: MinigameReport) -> GameState {
    if state.screen != Screen::Game {
        log::warn!("minigame report outside the game screen ({})", state.screen);
        return state;
    }
    let Some(scenario) = active_scenario(&state, ctx) else {
        log::warn!("minigame report without an active scenario");
        return state;
    };
    if !scenario.kind.is_minigame() {
        log::warn!("scenario {} is not a minigame", scenario.id);
        return state;
    }
    let outcome = report.into_outcome(scenario);
    apply_scenario_outcome(state, ctx, scenario, &outcome).state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Act;
    use crate::state::GameStatus;

    fn ctx() -> GameContext {
        GameContext::load_from_static().unwrap()
    }

    fn run(ctx: &GameContext, actions: Vec<Action>) -> GameState {
        actions
            .into_iter()
            .fold(GameState::new(ctx), |state, action| reduce(state, ctx, action))
    }

    #[test]
    fn menu_flow_reaches_the_map() {
        let ctx = ctx();
        let state = run(&ctx, vec![
            Action::StartGame,
            Action::SetPlayerName("  Robin ".to_string()),
            Action::SelectCharacter("priya".to_string()),
            Action::SelectSkill("KNOWLEDGE_BASE".to_string()),
            Action::ConfirmSkills,
        ]);
        assert_eq!(state.screen(), Screen::MapSelect);
        assert_eq!(state.player_name(), "Robin");
        assert_eq!(state.character(), Some("priya"));
        assert_eq!(state.stats(), Stats::new(90, 80, 60));
        assert_eq!(state.selected_skill(), Some("KNOWLEDGE_BASE"));
    }

    #[test]
    fn out_of_order_actions_are_dropped() {
        let ctx = ctx();
        let fresh = GameState::new(&ctx);
        let state = reduce(fresh.clone(), &ctx, Action::ConfirmSkills);
        assert_eq!(state, fresh);
        let state = reduce(state, &ctx, Action::SelectCharacter("alex".to_string()));
        assert_eq!(state, fresh);
        let state = reduce(state, &ctx, Action::ResolveScenario { option_index: 0 });
        assert_eq!(state, fresh);
    }

    #[test]
    fn minigame_reports_resolve_minigames_only() {
        let ctx = ctx();
        let map = run(&ctx, vec![
            Action::StartGame,
            Action::SelectCharacter("alex".to_string()),
            Action::ConfirmSkills,
        ]);
        let triage = reduce(map.clone(), &ctx, Action::SelectLocation("OFFICE".to_string()));
        let ignored = reduce(
            triage.clone(),
            &ctx,
            Action::ReportMinigame(MinigameReport::Success(true)),
        );
        assert_eq!(ignored, triage);

        let puzzle = reduce(map, &ctx, Action::SelectLocation("SERVER_ROOM".to_string()));
        assert_eq!(puzzle.current_scenario(), Some("act1_3"));
        let solved = reduce(
            puzzle,
            &ctx,
            Action::ReportMinigame(MinigameReport::Success(true)),
        );
        assert!(solved.is_completed("act1_3"));
        assert_eq!(solved.stats(), Stats::new(90, 100, 60));
        assert_eq!(solved.screen(), Screen::MapSelect);
        assert_eq!(solved.act(), Act::Act1Ticket);
    }

    #[test]
    fn depleted_start_stats_end_the_run_at_once() {
        let mut ctx = ctx();
        ctx.catalog.characters.0[0].start.morale = 0;
        let id = ctx.catalog.characters.0[0].id.clone();
        let state = run(&ctx, vec![Action::StartGame, Action::SelectCharacter(id)]);
        assert_eq!(state.status(), GameStatus::Lost);
        assert_eq!(state.screen(), Screen::GameOver);
        assert_eq!(
            state.game_over_reason().map(|r| r.stat()),
            Some(crate::stats::StatKind::Morale)
        );
    }

    #[test]
    fn unknown_scenario_id_is_a_no_op() {
        let ctx = ctx();
        let mut state = run(&ctx, vec![
            Action::StartGame,
            Action::SelectCharacter("alex".to_string()),
            Action::ConfirmSkills,
            Action::SelectLocation("SERVER_ROOM".to_string()),
        ]);
        state.current_scenario = Some("nope".to_string());

        let resolved = reduce(state.clone(), &ctx, Action::ResolveScenario { option_index: 0 });
        assert_eq!(resolved, state);
        let reported = reduce(
            state.clone(),
            &ctx,
            Action::ReportMinigame(MinigameReport::Success(true)),
        );
        assert_eq!(reported, state);
    }

    #[test]
    fn reset_restores_a_fresh_run() {
        let ctx = ctx();
        let played = run(&ctx, vec![
            Action::StartGame,
            Action::SelectCharacter("lena".to_string()),
            Action::ConfirmSkills,
            Action::SelectLocation("OFFICE".to_string()),
            Action::ResolveScenario { option_index: 0 },
            Action::SetLoading(true),
        ]);
        assert_eq!(played.act(), Act::Act2Perspective);
        assert!(played.transition().is_some());

        let reset = reduce(played, &ctx, Action::Reset);
        assert_eq!(reset, GameState::new(&ctx));
        assert_eq!(reset.status(), GameStatus::Active);
        assert!(reset.transition().is_none());
        assert!(!reset.is_loading());
    }
}
