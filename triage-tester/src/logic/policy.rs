use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use triage_game::{GameState, Scenario};

/// Decision returned by a [`PlayerPolicy`] for an open scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Pick the option at this index.
    Choose(usize),
    /// Report the result of a minigame.
    Minigame(bool),
}

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Pick a map location among `candidates`, or `None` to wait.
    fn pick_location(&mut self, state: &GameState, candidates: &[String]) -> Option<String>;

    /// Decide how to resolve the scenario on screen.
    fn pick_choice(&mut self, state: &GameState, scenario: &Scenario) -> PolicyDecision;
}

/// Built-in play styles for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayStyle {
    Perfect,
    Careless,
    Random,
    Idle,
}

impl PlayStyle {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PlayStyle::Perfect => "Perfect",
            PlayStyle::Careless => "Careless",
            PlayStyle::Random => "Random",
            PlayStyle::Idle => "Idle",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy + Send> {
        match self {
            PlayStyle::Perfect => Box::new(KnownAnswerPolicy { correct: true }),
            PlayStyle::Careless => Box::new(KnownAnswerPolicy { correct: false }),
            PlayStyle::Random => Box::new(RandomPolicy::new(seed)),
            PlayStyle::Idle => Box::new(IdlePolicy),
        }
    }
}

impl fmt::Display for PlayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Always answers right, or always answers wrong.
struct KnownAnswerPolicy {
    correct: bool,
}

impl PlayerPolicy for KnownAnswerPolicy {
    fn name(&self) -> &'static str {
        if self.correct { "perfect" } else { "careless" }
    }

    fn pick_location(&mut self, _state: &GameState, candidates: &[String]) -> Option<String> {
        candidates.first().cloned()
    }

    fn pick_choice(&mut self, _state: &GameState, scenario: &Scenario) -> PolicyDecision {
        if scenario.kind.is_minigame() {
            return PolicyDecision::Minigame(self.correct);
        }
        let index = scenario
            .options
            .iter()
            .position(|o| o.is_correct == self.correct)
            .unwrap_or(0);
        PolicyDecision::Choose(index)
    }
}

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl PlayerPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn pick_location(&mut self, _state: &GameState, candidates: &[String]) -> Option<String> {
        if candidates.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..candidates.len());
        candidates.get(index).cloned()
    }

    fn pick_choice(&mut self, _state: &GameState, scenario: &Scenario) -> PolicyDecision {
        if scenario.kind.is_minigame() || scenario.options.is_empty() {
            return PolicyDecision::Minigame(self.rng.gen_bool(0.5));
        }
        PolicyDecision::Choose(self.rng.gen_range(0..scenario.options.len()))
    }
}

/// Never visits the map; lets the SLA clock run out.
struct IdlePolicy;

impl PlayerPolicy for IdlePolicy {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn pick_location(&mut self, _state: &GameState, _candidates: &[String]) -> Option<String> {
        None
    }

    fn pick_choice(&mut self, _state: &GameState, _scenario: &Scenario) -> PolicyDecision {
        PolicyDecision::Choose(0)
    }
}
