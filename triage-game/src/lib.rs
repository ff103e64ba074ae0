//! Triage Trail Game Engine
//!
//! Platform-agnostic core for a narrative game about classifying IT service
//! work: incidents, service requests, changes and inquiries. The crate holds
//! the stat model, the content catalog and the act/scene state machine; front
//! ends drive it through [`journey::Action`]s dispatched into a
//! [`journey::GameSession`].

pub mod catalog;
pub mod characters;
pub mod config;
pub mod constants;
pub mod context;
pub mod data;
pub mod endgame;
pub mod journey;
pub mod loader;
pub mod locations;
pub mod minigame;
pub mod numbers;
pub mod progression;
pub mod result;
#[cfg(feature = "async")]
pub mod runtime;
pub mod scheduler;
pub mod skills;
pub mod state;
pub mod stats;
pub mod transition;

use anyhow::Context as _;

// Re-export commonly used types
pub use catalog::{ContentCatalog, ContentError};
pub use characters::{Character, CharacterList, CharacterStart, Role};
pub use config::{ConfigError, RulesConfig};
pub use context::GameContext;
pub use data::{Act, OptionKind, Scenario, ScenarioKind, ScenarioOption};
pub use endgame::{GameOverCheck, GameOverReason, check_game_over};
pub use journey::{
    ActTransition, Action, GameSession, ProgressionEvent, ScenarioOutcome, apply_scenario_outcome,
    consume_skill, reduce, resolve_scenario, select_location, select_skill, tick_sla_decay,
    validate_selected_skill,
};
pub use loader::{DirLoader, LoadError, StaticLoader};
pub use locations::{LocationKind, MapLocation};
pub use minigame::{MinigameParams, MinigameReport};
pub use progression::{mark_scenario_completed, record_wrong_answer, unlock_location, unlock_skill};
pub use result::{Ending, Grade, ResultSummary, result_summary};
#[cfg(feature = "async")]
pub use runtime::SharedSession;
pub use scheduler::SessionId;
pub use skills::{Inventory, Skill, SkillUse};
pub use state::{GameState, GameStatus, LogEntry, Screen, Speaker, WrongAnswer};
pub use stats::{StatKind, Stats, clamp_stat};
pub use transition::{SceneTransition, TransitionPhase};

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the content catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be read, parsed or validated.
    fn load_catalog(&self) -> Result<ContentCatalog, Self::Error>;

    /// Load the rules configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the rules cannot be read or parsed.
    fn load_rules(&self) -> Result<RulesConfig, Self::Error>;
}

/// Main game engine: turns a data source into ready-to-play sessions
pub struct GameEngine<L>
where
    L: DataLoader,
{
    data_loader: L,
}

impl<L> GameEngine<L>
where
    L: DataLoader,
{
    /// Create a new game engine with the provided data loader
    pub const fn new(data_loader: L) -> Self {
        Self { data_loader }
    }

    /// Load content and rules and check that they agree with each other.
    ///
    /// # Errors
    ///
    /// Returns an error if either source fails to load or the rules reference
    /// content the catalog does not define.
    pub fn load_context(&self) -> anyhow::Result<GameContext> {
        let catalog = self
            .data_loader
            .load_catalog()
            .context("loading content catalog")?;
        let rules = self
            .data_loader
            .load_rules()
            .context("loading rules config")?;
        GameContext::new(catalog, rules).context("validating rules against content")
    }

    /// Start a new session with the given seed
    ///
    /// # Errors
    ///
    /// Returns an error if content or rules cannot be loaded.
    pub fn create_session(&self, seed: u64) -> anyhow::Result<GameSession> {
        Ok(GameSession::new(self.load_context()?, seed))
    }
}
