use anyhow::{Result, bail, ensure};
use triage_game::{Act, Ending, GameOverReason, GameStatus};

use crate::logic::{PlayStyle, SimulationPlan, SimulationSummary};

/// Names run by the `all` keyword, in order.
pub const ALL_SCENARIOS: [&str; 5] = [
    "smoke",
    "perfect-run",
    "careless-run",
    "random-run",
    "decay-only",
];

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub plan: SimulationPlan,
}

impl TestScenario {
    #[must_use]
    pub fn simulation(name: impl Into<String>, plan: SimulationPlan) -> Self {
        Self {
            name: name.into(),
            plan,
        }
    }
}

#[must_use]
pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let scenario = match name.to_lowercase().as_str() {
        "smoke" => TestScenario::simulation(
            "Smoke",
            SimulationPlan::new(PlayStyle::Perfect)
                .with_max_turns(1)
                .with_expectation(smoke_expectation),
        ),
        "perfect-run" | "perfect" => TestScenario::simulation(
            "Perfect Run",
            SimulationPlan::new(PlayStyle::Perfect).with_expectation(perfect_expectation),
        ),
        "careless-run" | "careless" => TestScenario::simulation(
            "Careless Run",
            SimulationPlan::new(PlayStyle::Careless).with_expectation(careless_expectation),
        ),
        "random-run" | "random" => TestScenario::simulation(
            "Random Run",
            SimulationPlan::new(PlayStyle::Random)
                .with_expectation(ended_expectation)
                .with_expectation(bookkeeping_expectation),
        ),
        "decay-only" | "idle" => TestScenario::simulation(
            "Decay Only",
            SimulationPlan::new(PlayStyle::Idle)
                .with_character("alex")
                .with_think_ms(250)
                .with_expectation(decay_expectation),
        ),
        _ => return None,
    };
    Some(scenario)
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "One correct answer: onboarding and the act 1 opener"),
        ("perfect-run", "Every answer correct, expected to reach victory"),
        ("careless-run", "Every answer wrong, expected quality collapse"),
        ("random-run", "Seeded random choices, checks bookkeeping invariants"),
        ("decay-only", "Never answers; the SLA clock must end the run"),
    ]
}

fn smoke_expectation(summary: &SimulationSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(summary.halted, "smoke run should stop on its turn budget");
    ensure!(state.turn() == 1, "expected one turn, got {}", state.turn());
    ensure!(
        state.act() == Act::Act2Perspective,
        "opener should advance to act 2, still in {}",
        state.act()
    );
    ensure!(state.status() == GameStatus::Active, "run ended during smoke");
    ensure!(
        state.is_skill_unlocked("ACTIVE_LISTENING"),
        "act 2 skill not unlocked"
    );
    ensure!(summary.scenes.len() == 1, "expected one scene, saw {:?}", summary.scenes);
    Ok(())
}

fn perfect_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(
        summary.result.ending == Ending::Victory,
        "expected victory, got {}",
        summary.result.ending
    );
    ensure!(summary.decisions.iter().all(|d| d.correct), "a wrong answer slipped in");
    ensure!(summary.final_state.wrong_answers().is_empty(), "wrong answers recorded");
    ensure!(
        summary.final_state.act() == Act::Act4Epilogue,
        "victory outside the epilogue"
    );
    ensure!(
        summary.scenes.len() == 2,
        "expected act 2 and act 3 scenes, saw {:?}",
        summary.scenes
    );
    Ok(())
}

fn careless_expectation(summary: &SimulationSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(state.status() == GameStatus::Lost, "careless run did not lose");
    ensure!(
        state.game_over_reason() == Some(GameOverReason::QualityCollapsed),
        "expected quality collapse, got {:?}",
        state.game_over_reason()
    );
    ensure!(
        state.wrong_answers().len() == summary.decisions.len(),
        "{} wrong answers for {} decisions",
        state.wrong_answers().len(),
        summary.decisions.len()
    );
    Ok(())
}

fn ended_expectation(summary: &SimulationSummary) -> Result<()> {
    if summary.halted || !summary.game_ended() {
        bail!("run never reached an ending after {} steps", summary.steps);
    }
    ensure!(summary.result.ending != Ending::InProgress, "ending still in progress");
    Ok(())
}

fn bookkeeping_expectation(summary: &SimulationSummary) -> Result<()> {
    let state = &summary.final_state;
    let stats = state.stats();
    for value in [stats.sla, stats.morale, stats.quality] {
        ensure!((0..=100).contains(&value), "stat out of range: {value}");
    }
    let turns = usize::try_from(state.turn())?;
    ensure!(
        summary.decisions.len() == turns,
        "{} decisions for {turns} turns",
        summary.decisions.len()
    );
    let wrong = summary.decisions.iter().filter(|d| !d.correct).count();
    ensure!(
        state.wrong_answers().len() == wrong,
        "{} wrong answers recorded for {wrong} wrong decisions",
        state.wrong_answers().len()
    );
    ensure!(
        summary.result.correct + wrong == summary.result.answered,
        "result counts do not add up"
    );
    ensure!((0..=300).contains(&summary.result.score), "score out of range");
    Ok(())
}

fn decay_expectation(summary: &SimulationSummary) -> Result<()> {
    let state = &summary.final_state;
    ensure!(
        summary.result.ending == Ending::SlaBreach,
        "expected SLA breach, got {}",
        summary.result.ending
    );
    ensure!(state.turn() == 0, "idle run answered {} scenarios", state.turn());
    ensure!(
        summary.clock_ms >= 100 * 5_000,
        "SLA ran out early at {} ms",
        summary.clock_ms
    );
    Ok(())
}
