use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use triage_game::{
    Action, ContentCatalog, GameContext, GameSession, GameState, MinigameReport, ResultSummary,
    Screen, SessionId,
};

use crate::logic::policy::{PlayStyle, PolicyDecision};

/// Simulated milliseconds a player spends on each screen.
pub const DEFAULT_THINK_MS: u64 = 1_000;
/// Upper bound on loop iterations before a run counts as halted.
pub const DEFAULT_MAX_STEPS: usize = 2_000;
const PLAYER_NAME: &str = "Tester";

/// Declarative plan for running a simulation session.
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub style: PlayStyle,
    /// Fixed character id; `None` picks one from the roster by seed.
    pub character: Option<String>,
    pub max_turns: Option<u32>,
    pub think_ms: u64,
    pub max_steps: usize,
    pub expectations: Vec<SimulationExpectation>,
}

impl SimulationPlan {
    #[must_use]
    pub fn new(style: PlayStyle) -> Self {
        Self {
            style,
            character: None,
            max_turns: None,
            think_ms: DEFAULT_THINK_MS,
            max_steps: DEFAULT_MAX_STEPS,
            expectations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_character(mut self, id: impl Into<String>) -> Self {
        self.character = Some(id.into());
        self
    }

    #[must_use]
    pub const fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    #[must_use]
    pub const fn with_think_ms(mut self, think_ms: u64) -> Self {
        self.think_ms = think_ms;
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<SimulationExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}

/// Assertion hook run after a simulation completes.
type SimulationExpectationFn =
    Arc<dyn Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static>;

#[derive(Clone)]
pub struct SimulationExpectation(SimulationExpectationFn);

impl std::fmt::Debug for SimulationExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationExpectation").finish()
    }
}

impl SimulationExpectation {
    pub fn evaluate(&self, summary: &SimulationSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for SimulationExpectation
where
    F: Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

/// One answered scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRecord {
    pub turn: u32,
    pub scenario_id: String,
    pub location: String,
    pub choice_label: String,
    pub correct: bool,
    pub policy_name: &'static str,
}

/// Complete record of a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationSummary {
    pub seed: u64,
    pub style: PlayStyle,
    pub character: String,
    pub session_id: SessionId,
    pub decisions: Vec<DecisionRecord>,
    /// Title keys of every scene transition that opened, in order.
    pub scenes: Vec<String>,
    pub final_state: GameState,
    pub result: ResultSummary,
    pub steps: usize,
    pub clock_ms: u64,
    /// The run stopped on a budget instead of reaching an ending.
    pub halted: bool,
}

impl SimulationSummary {
    #[must_use]
    pub fn game_ended(&self) -> bool {
        !self.final_state.status().is_active()
    }
}

/// Drives [`GameSession`]s with automated policies.
#[derive(Debug, Clone)]
pub struct GameTester {
    ctx: Arc<GameContext>,
    verbose: bool,
}

impl GameTester {
    #[must_use]
    pub fn new(ctx: Arc<GameContext>, verbose: bool) -> Self {
        Self { ctx, verbose }
    }

    /// Tester over the bundled content and rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled assets fail to load.
    pub fn try_new(verbose: bool) -> Result<Self> {
        let ctx = GameContext::load_from_static().context("loading bundled game content")?;
        Ok(Self::new(Arc::new(ctx), verbose))
    }

    #[must_use]
    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    #[must_use]
    pub fn run_plan(&self, plan: &SimulationPlan, seed: u64) -> SimulationSummary {
        let catalog = &self.ctx.catalog;
        let mut session = GameSession::new(GameContext::clone(&self.ctx), seed);
        let mut policy = plan.style.create_policy(seed);
        let character = plan
            .character
            .clone()
            .unwrap_or_else(|| roster_pick(catalog, seed));

        let scenes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&scenes);
        let mut last_scene = None;
        session.subscribe(move |state: &GameState| {
            if let Some(scene) = state.transition()
                && last_scene != Some(scene.id)
            {
                last_scene = Some(scene.id);
                if let Ok(mut seen) = sink.lock() {
                    seen.push(scene.title_key.clone());
                }
            }
        });

        let mut decisions = Vec::new();
        let mut steps = 0;
        let mut halted = false;

        loop {
            let state = session.state();
            if !state.status().is_active() {
                break;
            }
            if let Some(max) = plan.max_turns
                && state.turn() >= max
            {
                halted = true;
                break;
            }
            if steps >= plan.max_steps {
                log::warn!("seed {seed}: step budget {} exhausted", plan.max_steps);
                halted = true;
                break;
            }
            steps += 1;

            match state.screen() {
                Screen::Intro => {
                    session.dispatch(Action::StartGame);
                }
                Screen::CharSelect => {
                    session.dispatch(Action::SetPlayerName(PLAYER_NAME.to_string()));
                    session.dispatch(Action::SelectCharacter(character.clone()));
                }
                Screen::SkillSelect => {
                    if let Some(skill) = preferred_skill(state, catalog) {
                        session.dispatch(Action::SelectSkill(skill));
                    }
                    session.dispatch(Action::ConfirmSkills);
                }
                Screen::MapSelect => {
                    let candidates = open_locations(state, catalog);
                    let Some(location) = policy.pick_location(state, &candidates) else {
                        session.advance_clock(self.ctx.rules.decay.interval_ms);
                        continue;
                    };
                    if self.verbose {
                        println!("    🗺️  turn {} -> {location}", state.turn());
                    }
                    session.dispatch(Action::SelectLocation(location));
                }
                Screen::Game => {
                    let Some(scenario) = state
                        .current_scenario()
                        .and_then(|id| catalog.scenario(id))
                    else {
                        log::warn!("seed {seed}: game screen without a scenario");
                        halted = true;
                        break;
                    };
                    let decision = policy.pick_choice(state, scenario);
                    let (action, label, correct) = match decision {
                        PolicyDecision::Choose(index) => {
                            let option = scenario.option(index);
                            (
                                Action::ResolveScenario {
                                    option_index: index,
                                },
                                option.map_or_else(|| format!("#{index}"), |o| o.label.clone()),
                                option.is_some_and(|o| o.is_correct),
                            )
                        }
                        PolicyDecision::Minigame(won) => (
                            Action::ReportMinigame(MinigameReport::Success(won)),
                            if won { "minigame:won" } else { "minigame:lost" }.to_string(),
                            won,
                        ),
                    };
                    decisions.push(DecisionRecord {
                        turn: state.turn() + 1,
                        scenario_id: scenario.id.clone(),
                        location: state.selected_location().unwrap_or_default().to_string(),
                        choice_label: label,
                        correct,
                        policy_name: policy.name(),
                    });
                    session.dispatch(action);
                }
                Screen::Victory | Screen::GameOver => break,
            }
            session.advance_clock(plan.think_ms);
        }

        let scenes = scenes.lock().map(|s| s.clone()).unwrap_or_default();
        SimulationSummary {
            seed,
            style: plan.style,
            character,
            session_id: session.session_id(),
            decisions,
            scenes,
            result: session.result(),
            clock_ms: session.now_ms(),
            final_state: session.into_state(),
            steps,
            halted,
        }
    }
}

fn roster_pick(catalog: &ContentCatalog, seed: u64) -> String {
    let len = u64::try_from(catalog.characters.len()).unwrap_or(1).max(1);
    let index = usize::try_from(seed % len).unwrap_or(0);
    catalog
        .characters
        .0.get(index)
        .map(|c| c.id.clone())
        .unwrap_or_default()
}

/// Unlocked, reachable locations that still hold a scenario for the current act.
#[must_use]
pub fn open_locations(state: &GameState, catalog: &ContentCatalog) -> Vec<String> {
    let mut open: Vec<String> = Vec::new();
    for scenario in catalog.scenarios_in(state.act()) {
        let Some(location) = scenario.location.as_deref() else {
            continue;
        };
        if state.is_completed(&scenario.id)
            || !state.is_location_unlocked(location)
            || open.iter().any(|l| l == location)
        {
            continue;
        }
        if catalog
            .location(location)
            .is_some_and(|l| l.is_reachable_in(state.act()))
        {
            open.push(location.to_string());
        }
    }
    open
}

/// Newest useful skill for the current act, falling back to any good skill.
fn preferred_skill(state: &GameState, catalog: &ContentCatalog) -> Option<String> {
    let usable = || {
        catalog
            .skills
            .iter()
            .filter(move |s| !s.is_bad_item && state.is_skill_unlocked(&s.id))
    };
    usable()
        .filter(|s| s.target_act == state.act())
        .last()
        .or_else(|| usable().next())
        .map(|s| s.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_game::{Act, Ending, GameStatus};

    fn tester() -> GameTester {
        GameTester::try_new(false).unwrap()
    }

    #[test]
    fn perfect_plan_wins_with_every_character() {
        let tester = tester();
        for character in &tester.context().catalog.characters {
            let plan = SimulationPlan::new(PlayStyle::Perfect).with_character(character.id.clone());
            let summary = tester.run_plan(&plan, 5);
            assert_eq!(summary.result.ending, Ending::Victory, "{}", character.id);
            assert_eq!(summary.decisions.len(), 4);
            assert!(summary.decisions.iter().all(|d| d.correct));
            assert_eq!(summary.scenes.len(), 2);
            assert!(!summary.halted);
        }
    }

    #[test]
    fn turn_budget_halts_early() {
        let tester = tester();
        let plan = SimulationPlan::new(PlayStyle::Perfect).with_max_turns(1);
        let summary = tester.run_plan(&plan, 1);
        assert!(summary.halted);
        assert_eq!(summary.final_state.turn(), 1);
        assert_eq!(summary.final_state.act(), Act::Act2Perspective);
        assert_eq!(summary.final_state.status(), GameStatus::Active);
    }

    #[test]
    fn random_runs_replay_for_the_same_seed() {
        let tester = tester();
        let plan = SimulationPlan::new(PlayStyle::Random);
        let a = tester.run_plan(&plan, 77);
        let b = tester.run_plan(&plan, 77);
        assert_eq!(a.decisions, b.decisions);
        assert_eq!(a.final_state, b.final_state);
        assert_eq!(a.session_id, b.session_id);
    }

    #[test]
    fn open_locations_follow_unlocks() {
        let tester = tester();
        let ctx = tester.context();
        let state = GameState::new(ctx);
        assert_eq!(
            open_locations(&state, &ctx.catalog),
            vec!["OFFICE", "SERVICE_DESK", "SERVER_ROOM"]
        );
        let act2 = GameState::new(ctx).with_act(Act::Act2Perspective);
        assert!(!open_locations(&act2, &ctx.catalog).contains(&"SCHOOL".to_string()));
    }

    #[test]
    fn skill_preference_skips_bad_items() {
        let tester = tester();
        let ctx = tester.context();
        let state = GameState::new(ctx);
        assert_eq!(
            preferred_skill(&state, &ctx.catalog).as_deref(),
            Some("KNOWLEDGE_BASE")
        );
    }
}
