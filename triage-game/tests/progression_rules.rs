use triage_game::{
    Act, GameContext, GameState, GameStatus, ProgressionEvent, Scenario, ScenarioOutcome, Screen,
    StatKind, Stats, apply_scenario_outcome, check_game_over, clamp_stat, select_skill,
};

fn ctx() -> GameContext {
    GameContext::load_from_static().unwrap()
}

fn playing(ctx: &GameContext, act: Act) -> GameState {
    GameState::new(ctx).with_act(act).with_screen(Screen::Game)
}

fn pick(scenario: &Scenario, correct: bool) -> ScenarioOutcome {
    let option = scenario
        .options
        .iter()
        .find(|o| o.is_correct == correct)
        .unwrap();
    ScenarioOutcome::from_option(option)
}

fn complete(ctx: &GameContext, state: GameState, id: &str, correct: bool) -> GameState {
    let scenario = ctx.catalog.scenario(id).unwrap();
    apply_scenario_outcome(state, ctx, scenario, &pick(scenario, correct)).state
}

#[test]
fn clamp_stays_in_range_for_finite_input() {
    let mut value = -1_000.0_f64;
    while value <= 1_000.0 {
        let clamped = clamp_stat(value);
        assert!((0..=100).contains(&clamped), "{value} -> {clamped}");
        value += 12.5;
    }
    assert_eq!(clamp_stat(f64::NAN), 0);
    assert_eq!(clamp_stat(f64::INFINITY), 0);
    assert_eq!(clamp_stat(f64::NEG_INFINITY), 0);
}

#[test]
fn game_over_priority_and_threshold() {
    for (sla, morale, quality, label) in [
        (0, 50, 50, "SLA"),
        (50, 0, 50, "MORALE"),
        (50, 50, 0, "QUALITY"),
        (0, 0, 50, "SLA"),
    ] {
        let check = check_game_over(sla, morale, quality);
        assert!(check.is_game_over);
        assert!(check.reason.unwrap().to_string().contains(label));
    }
    assert!(!check_game_over(1, 1, 1).is_game_over);
}

#[test]
fn repeating_a_completed_scenario_does_not_duplicate_it() {
    let ctx = ctx();
    let state = complete(&ctx, playing(&ctx, Act::Act1Ticket), "act1_2", true);
    let state = complete(&ctx, state.with_screen(Screen::Game), "act1_2", true);
    let count = state
        .completed_scenarios()
        .iter()
        .filter(|id| id.as_str() == "act1_2")
        .count();
    assert_eq!(count, 1);
    assert_eq!(state.turn(), 2);
}

#[test]
fn opener_unlocks_act_two_whatever_the_answer() {
    let ctx = ctx();
    for correct in [true, false] {
        let equipped = select_skill(playing(&ctx, Act::Act1Ticket), "KNOWLEDGE_BASE");
        assert_eq!(equipped.selected_skill(), Some("KNOWLEDGE_BASE"));
        let state = complete(&ctx, equipped, "act1_1", correct);
        assert_eq!(state.act(), Act::Act2Perspective);
        assert_eq!(state.selected_skill(), None);
        assert!(state.is_location_unlocked("SCHOOL"));
        assert!(state.is_skill_unlocked("ACTIVE_LISTENING"));
        assert_eq!(state.screen(), Screen::SkillSelect);
        assert_eq!(state.wrong_answers().is_empty(), correct);
    }
}

#[test]
fn boss_gate_needs_both_core_scenarios_in_either_order() {
    let ctx = ctx();
    for order in [["act2_1", "act2_2"], ["act2_2", "act2_1"]] {
        let state = playing(&ctx, Act::Act2Perspective);
        let state = complete(&ctx, state, order[0], true);
        assert_eq!(state.act(), Act::Act2Perspective);
        assert!(!state.is_location_unlocked("DATA_CENTER"));
        assert_eq!(state.screen(), Screen::MapSelect);

        let state = complete(&ctx, state.with_screen(Screen::Game), order[1], true);
        assert_eq!(state.act(), Act::Act3Boss);
        assert!(state.is_location_unlocked("DATA_CENTER"));
        assert!(state.is_skill_unlocked("CHANGE_CALENDAR"));
        assert_eq!(state.screen(), Screen::MapSelect);
    }
}

#[test]
fn side_scenarios_do_not_open_the_boss() {
    let ctx = ctx();
    let state = playing(&ctx, Act::Act2Perspective);
    let state = complete(&ctx, state, "act2_5", true);
    let state = complete(&ctx, state.with_screen(Screen::Game), "act2_1", false);
    assert_eq!(state.act(), Act::Act2Perspective);
}

#[test]
fn positive_outcome_clamps_morale() {
    let ctx = ctx();
    let scenario = ctx.catalog.scenario("act1_2").unwrap();
    let outcome = ScenarioOutcome {
        selected_label: "Fulfil".to_string(),
        quality_change: 30,
        morale_change: 10,
        outcome_text: String::new(),
        is_correct: true,
    };
    let state = playing(&ctx, Act::Act1Ticket).with_stats(Stats::new(100, 100, 50));
    let result = apply_scenario_outcome(state, &ctx, scenario, &outcome);
    assert_eq!(result.state.stats(), Stats::new(90, 100, 80));
    assert_eq!(result.state.status(), GameStatus::Active);
}

#[test]
fn quality_collapse_beats_low_sla() {
    let ctx = ctx();
    let scenario = ctx.catalog.scenario("act1_1").unwrap();
    let outcome = ScenarioOutcome {
        selected_label: "Raise a Change".to_string(),
        quality_change: -20,
        morale_change: 0,
        outcome_text: String::new(),
        is_correct: false,
    };
    let state = playing(&ctx, Act::Act1Ticket).with_stats(Stats::new(15, 60, 15));
    let result = apply_scenario_outcome(state, &ctx, scenario, &outcome);
    assert_eq!(result.state.stats().sla, 5);
    assert_eq!(result.state.stats().quality, 0);
    assert_eq!(result.state.status(), GameStatus::Lost);
    assert_eq!(result.state.screen(), Screen::GameOver);
    let reason = result.game_over.reason.unwrap();
    assert_eq!(reason.stat(), StatKind::Quality);
    assert!(reason.to_string().contains("QUALITY"));
    assert_eq!(result.event, ProgressionEvent::GameOver);
    assert_eq!(result.state.act(), Act::Act1Ticket);
}

#[test]
fn boss_clear_wins_regardless_of_stat_levels() {
    let ctx = ctx();
    for stats in [Stats::new(100, 100, 100), Stats::new(11, 1, 1)] {
        let state = playing(&ctx, Act::Act3Boss).with_stats(stats);
        let state = complete(&ctx, state, "act3_1", true);
        assert_eq!(state.status(), GameStatus::Won);
        assert_eq!(state.screen(), Screen::Victory);
        assert_eq!(state.act(), Act::Act4Epilogue);
    }
}

#[test]
fn wrong_answer_captures_the_review_fields() {
    let ctx = ctx();
    let scenario = ctx.catalog.scenario("act2_2").unwrap();
    let wrong = pick(scenario, false);
    let state = complete(&ctx, playing(&ctx, Act::Act2Perspective), "act2_2", false);
    let record = &state.wrong_answers()[0];
    assert_eq!(record.scenario_title, scenario.title);
    assert_eq!(record.chosen_label, wrong.selected_label);
    assert_eq!(record.correct_label, scenario.correct_option().unwrap().label);
    assert_eq!(record.explanation, wrong.outcome_text);
}
