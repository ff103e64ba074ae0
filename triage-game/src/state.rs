//! The per-playthrough snapshot every reducer step produces.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::constants::LOG_BOOT;
use crate::context::GameContext;
use crate::data::{Act, Scenario, ScenarioOption};
use crate::endgame::GameOverReason;
use crate::skills::Inventory;
use crate::stats::Stats;
use crate::transition::SceneTransition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    #[default]
    Intro,
    CharSelect,
    SkillSelect,
    MapSelect,
    Game,
    Victory,
    GameOver,
}

impl Screen {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "INTRO",
            Self::CharSelect => "CHAR_SELECT",
            Self::SkillSelect => "SKILL_SELECT",
            Self::MapSelect => "MAP_SELECT",
            Self::Game => "GAME",
            Self::Victory => "VICTORY",
            Self::GameOver => "GAME_OVER",
        }
    }

    /// Screens before the run proper starts; the SLA clock does not tick here.
    #[must_use]
    pub const fn is_menu(self) -> bool {
        matches!(self, Self::Intro | Self::CharSelect)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::GameOver)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Active,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Speaker {
    System,
    Gm,
    Player,
}

/// One narrative log line. `key` is a translation key, `detail` carries the
/// interpolated payload (a label, an id, a number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp_ms: u64,
    pub turn: u32,
    pub speaker: Speaker,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Review record for an incorrect decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongAnswer {
    pub scenario_id: String,
    pub scenario_title: String,
    pub chosen_label: String,
    pub correct_label: String,
    pub explanation: String,
}

impl WrongAnswer {
    /// Build a review record for `chosen` within `scenario`.
    #[must_use]
    pub fn from_choice(scenario: &Scenario, chosen_label: &str, explanation: &str) -> Self {
        Self {
            scenario_id: scenario.id.clone(),
            scenario_title: scenario.title.clone(),
            chosen_label: chosen_label.to_string(),
            correct_label: scenario
                .correct_option()
                .map(|opt: &ScenarioOption| opt.label.clone())
                .unwrap_or_default(),
            explanation: explanation.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) screen: Screen,
    pub(crate) act: Act,
    pub(crate) character: Option<String>,
    pub(crate) selected_skill: Option<String>,
    pub(crate) player_name: String,
    pub(crate) selected_location: Option<String>,
    pub(crate) unlocked_locations: BTreeSet<String>,
    pub(crate) unlocked_skills: BTreeSet<String>,
    pub(crate) completed_scenarios: BTreeSet<String>,
    pub(crate) wrong_answers: Vec<WrongAnswer>,
    pub(crate) stats: Stats,
    pub(crate) inventory: Inventory,
    pub(crate) turn: u32,
    pub(crate) logs: Vec<LogEntry>,
    pub(crate) current_scenario: Option<String>,
    pub(crate) loading: bool,
    pub(crate) status: GameStatus,
    pub(crate) game_over_reason: Option<GameOverReason>,
    pub(crate) transition: Option<SceneTransition>,
    pub(crate) transition_seq: u64,
    pub(crate) clock_ms: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            screen: Screen::Intro,
            act: Act::Act1Ticket,
            character: None,
            selected_skill: None,
            player_name: String::new(),
            selected_location: None,
            unlocked_locations: BTreeSet::new(),
            unlocked_skills: BTreeSet::new(),
            completed_scenarios: BTreeSet::new(),
            wrong_answers: Vec::new(),
            stats: Stats::default(),
            inventory: Inventory::new(),
            turn: 0,
            logs: Vec::new(),
            current_scenario: None,
            loading: false,
            status: GameStatus::Active,
            game_over_reason: None,
            transition: None,
            transition_seq: 0,
            clock_ms: 0,
        }
    }
}

impl GameState {
    /// Fresh playthrough: starting unlocks from the rules, one of every
    /// catalog skill in the inventory, and the boot log line.
    #[must_use]
    pub fn new(ctx: &GameContext) -> Self {
        let starting = &ctx.rules.progression.starting;
        let mut state = Self {
            unlocked_locations: starting.locations.iter().cloned().collect(),
            unlocked_skills: starting.skills.iter().cloned().collect(),
            inventory: Inventory::starter(ctx.catalog.skills.iter().map(|s| s.id.as_str())),
            ..Self::default()
        };
        state.push_log(Speaker::System, LOG_BOOT, None);
        state
    }

    // Accessors -------------------------------------------------------------

    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub const fn act(&self) -> Act {
        self.act
    }

    #[must_use]
    pub fn character(&self) -> Option<&str> {
        self.character.as_deref()
    }

    #[must_use]
    pub fn selected_skill(&self) -> Option<&str> {
        self.selected_skill.as_deref()
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[must_use]
    pub fn selected_location(&self) -> Option<&str> {
        self.selected_location.as_deref()
    }

    #[must_use]
    pub const fn unlocked_locations(&self) -> &BTreeSet<String> {
        &self.unlocked_locations
    }

    #[must_use]
    pub const fn unlocked_skills(&self) -> &BTreeSet<String> {
        &self.unlocked_skills
    }

    #[must_use]
    pub const fn completed_scenarios(&self) -> &BTreeSet<String> {
        &self.completed_scenarios
    }

    #[must_use]
    pub fn wrong_answers(&self) -> &[WrongAnswer] {
        &self.wrong_answers
    }

    #[must_use]
    pub const fn stats(&self) -> Stats {
        self.stats
    }

    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    #[must_use]
    pub fn current_scenario(&self) -> Option<&str> {
        self.current_scenario.as_deref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub const fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    #[must_use]
    pub const fn transition(&self) -> Option<&SceneTransition> {
        self.transition.as_ref()
    }

    #[must_use]
    pub const fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// True while the background SLA decay should be running.
    #[must_use]
    pub const fn decay_armed(&self) -> bool {
        self.status.is_active() && !self.screen.is_menu()
    }

    #[must_use]
    pub fn is_location_unlocked(&self, id: &str) -> bool {
        self.unlocked_locations.contains(id)
    }

    #[must_use]
    pub fn is_skill_unlocked(&self, id: &str) -> bool {
        self.unlocked_skills.contains(id)
    }

    #[must_use]
    pub fn is_completed(&self, scenario_id: &str) -> bool {
        self.completed_scenarios.contains(scenario_id)
    }

    pub(crate) fn push_log(&mut self, speaker: Speaker, key: &str, detail: Option<String>) {
        self.logs.push(LogEntry {
            timestamp_ms: self.clock_ms,
            turn: self.turn,
            speaker,
            key: key.to_string(),
            detail,
        });
    }

    pub(crate) fn set_clock(&mut self, now_ms: u64) {
        self.clock_ms = self.clock_ms.max(now_ms);
    }
}

/// Fixture builders for tests. Real play only moves through the reducer.
#[cfg(any(test, feature = "test-support"))]
impl GameState {
    #[must_use]
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn with_act(mut self, act: Act) -> Self {
        self.act = act;
        self
    }

    #[must_use]
    pub fn with_screen(mut self, screen: Screen) -> Self {
        self.screen = screen;
        self
    }

    #[must_use]
    pub fn with_completed<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.completed_scenarios
            .extend(ids.into_iter().map(ToString::to_string));
        self
    }
}
