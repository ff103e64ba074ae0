use triage_game::{
    Act, Action, DataLoader, Ending, GameContext, GameOverReason, GameSession, GameState,
    GameStatus, Grade, MinigameReport, Screen, Speaker, StaticLoader,
};

fn session(seed: u64) -> GameSession {
    let ctx = GameContext::new(
        StaticLoader.load_catalog().unwrap(),
        StaticLoader.load_rules().unwrap(),
    )
    .unwrap();
    GameSession::new(ctx, seed)
}

fn option_index(session: &GameSession, correct: bool) -> usize {
    let id = session.state().current_scenario().unwrap();
    let scenario = session.context().catalog.scenario(id).unwrap();
    scenario
        .options
        .iter()
        .position(|o| o.is_correct == correct)
        .unwrap()
}

fn visit(session: &mut GameSession, location: &str, correct: bool) {
    session.dispatch(Action::SelectLocation(location.to_string()));
    assert_eq!(session.state().screen(), Screen::Game, "{location}");
    let index = option_index(session, correct);
    session.dispatch(Action::ResolveScenario {
        option_index: index,
    });
}

fn onboard(session: &mut GameSession) {
    session.dispatch(Action::StartGame);
    session.dispatch(Action::SetPlayerName("Casey".to_string()));
    session.dispatch(Action::SelectCharacter("alex".to_string()));
    session.dispatch(Action::SelectSkill("KNOWLEDGE_BASE".to_string()));
    session.dispatch(Action::ConfirmSkills);
}

#[test]
fn perfect_run_reaches_victory() {
    let mut session = session(2024);
    onboard(&mut session);
    assert_eq!(session.state().screen(), Screen::MapSelect);

    visit(&mut session, "OFFICE", true);
    assert_eq!(session.state().act(), Act::Act2Perspective);
    assert_eq!(session.state().screen(), Screen::SkillSelect);
    assert_eq!(session.state().selected_skill(), None);
    session.dispatch(Action::SelectSkill("ACTIVE_LISTENING".to_string()));
    assert_eq!(session.state().selected_skill(), Some("ACTIVE_LISTENING"));
    session.dispatch(Action::ConfirmSkills);

    visit(&mut session, "SCHOOL", true);
    assert_eq!(session.state().act(), Act::Act2Perspective);
    visit(&mut session, "SERVICE_DESK", true);
    assert_eq!(session.state().act(), Act::Act3Boss);
    assert!(session.state().is_location_unlocked("DATA_CENTER"));

    visit(&mut session, "DATA_CENTER", true);
    let state = session.state();
    assert_eq!(state.status(), GameStatus::Won);
    assert_eq!(state.screen(), Screen::Victory);
    assert_eq!(state.act(), Act::Act4Epilogue);
    assert_eq!(state.stats().sla, 60);
    assert_eq!(state.stats().quality, 100);
    assert_eq!(state.turn(), 4);
    assert!(state.transition().is_none());
    assert_eq!(session.pending_tasks(), 0);

    let summary = session.result();
    assert_eq!(summary.ending, Ending::Victory);
    assert_eq!(summary.correct, 4);
    assert!(summary.wrong_answers.is_empty());
    assert_eq!(summary.score, state.stats().total());
    assert_eq!(summary.grade, Grade::from_score(summary.score));
    assert_eq!(summary.player_name, "Casey");

    // Terminal screens ignore further play.
    let frozen = session.state().clone();
    session.dispatch(Action::SelectLocation("OFFICE".to_string()));
    session.dispatch(Action::ResolveScenario { option_index: 0 });
    session.advance_clock(60_000);
    assert_eq!(session.state().status(), GameStatus::Won);
    assert_eq!(session.state().stats(), frozen.stats());
}

#[test]
fn careless_run_collapses_quality() {
    let mut session = session(7);
    onboard(&mut session);
    visit(&mut session, "OFFICE", false);
    session.dispatch(Action::ConfirmSkills);
    visit(&mut session, "SCHOOL", false);
    visit(&mut session, "SERVICE_DESK", false);

    let state = session.state();
    assert_eq!(state.status(), GameStatus::Lost);
    assert_eq!(state.screen(), Screen::GameOver);
    assert_eq!(state.game_over_reason(), Some(GameOverReason::QualityCollapsed));
    assert_eq!(state.act(), Act::Act2Perspective);
    assert_eq!(state.wrong_answers().len(), 3);
    assert!(state.transition().is_none());
    assert_eq!(session.result().ending, Ending::QualityCollapse);
}

#[test]
fn minigame_detour_counts_toward_turns() {
    let mut session = session(99);
    onboard(&mut session);
    session.dispatch(Action::SelectLocation("SERVER_ROOM".to_string()));
    assert_eq!(session.state().current_scenario(), Some("act1_3"));
    session.dispatch(Action::ReportMinigame(MinigameReport::Success(false)));
    let state = session.state();
    assert_eq!(state.turn(), 1);
    assert_eq!(state.act(), Act::Act1Ticket);
    assert_eq!(state.wrong_answers().len(), 1);
    assert_eq!(state.screen(), Screen::MapSelect);
}

#[test]
fn idle_player_loses_to_the_sla_clock() {
    let mut session = session(3);
    onboard(&mut session);
    session.advance_clock(499_999);
    assert_eq!(session.state().stats().sla, 1);
    session.advance_clock(1);
    assert_eq!(session.state().status(), GameStatus::Lost);
    assert_eq!(session.result().ending, Ending::SlaBreach);
}

#[test]
fn reset_restores_initial_values_and_clears_logs_and_scenes() {
    let mut session = session(11);
    onboard(&mut session);
    visit(&mut session, "OFFICE", true);
    assert!(session.state().transition().is_some());
    session.advance_clock(1_000);
    let before = session.session_id();

    session.reset();
    let fresh = GameState::new(session.context());
    let state = session.state();
    assert_ne!(session.session_id(), before);
    assert_eq!(state.screen(), Screen::Intro);
    assert_eq!(state.act(), Act::Act1Ticket);
    assert_eq!(state.stats(), fresh.stats());
    assert_eq!(state.unlocked_locations(), fresh.unlocked_locations());
    assert_eq!(state.unlocked_skills(), fresh.unlocked_skills());
    assert!(state.completed_scenarios().is_empty());
    assert!(state.wrong_answers().is_empty());
    assert!(state.transition().is_none());
    assert_eq!(state.logs().len(), 1);
    assert_eq!(state.logs()[0].speaker, Speaker::System);
    assert_eq!(session.pending_tasks(), 0);

    // Nothing scheduled before the reset may fire afterwards.
    session.advance_clock(10_000);
    assert_eq!(session.state().stats(), fresh.stats());
    assert!(session.state().transition().is_none());
}
