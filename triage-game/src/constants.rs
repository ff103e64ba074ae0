//! Centralized balance constants, stable content ids and log keys.
//!
//! Numeric defaults here back the embedded rules asset; if the asset fails to
//! parse the engine still runs on these values.

// Stat bounds ---------------------------------------------------------------
pub const STAT_MIN: i32 = 0;
pub const STAT_MAX: i32 = 100;
pub(crate) const DEFAULT_START_SLA: i32 = 100;
pub(crate) const DEFAULT_START_MORALE: i32 = 100;
pub(crate) const DEFAULT_START_QUALITY: i32 = 50;

// Timing --------------------------------------------------------------------
pub(crate) const BASE_SLA_COST: i32 = 10;
pub(crate) const SLA_DECAY_AMOUNT: i32 = 1;
pub(crate) const SLA_DECAY_INTERVAL_MS: u64 = 5_000;
pub(crate) const TRANSITION_TITLE_MS: u64 = 2_500;
pub(crate) const TRANSITION_SETTLE_MS: u64 = 1_500;

// Minigame fallbacks when a scenario has no authored options ----------------
pub(crate) const MINIGAME_SUCCESS_QUALITY: i32 = 10;
pub(crate) const MINIGAME_SUCCESS_MORALE: i32 = 5;
pub(crate) const MINIGAME_FAILURE_QUALITY: i32 = -10;
pub(crate) const MINIGAME_FAILURE_MORALE: i32 = -5;
pub(crate) const MINIGAME_SUCCESS_LABEL: &str = "minigame.success";
pub(crate) const MINIGAME_FAILURE_LABEL: &str = "minigame.failure";

// Content ids -----------------------------------------------------------------
pub const SCENARIO_ACT1_OPENER: &str = "act1_1";
pub const SCENARIO_ACT2_CORE: [&str; 2] = ["act2_1", "act2_2"];
pub const SCENARIO_BOSS: &str = "act3_1";
pub const LOCATION_SCHOOL: &str = "SCHOOL";
pub const LOCATION_DATA_CENTER: &str = "DATA_CENTER";
pub const SKILL_ACTIVE_LISTENING: &str = "ACTIVE_LISTENING";
pub const SKILL_CHANGE_CALENDAR: &str = "CHANGE_CALENDAR";

// Logging keys ------------------------------------------------------------------
pub(crate) const LOG_BOOT: &str = "log.boot";
pub(crate) const LOG_GAME_START: &str = "log.game.start";
pub(crate) const LOG_PLAYER_NAMED: &str = "log.player.named";
pub(crate) const LOG_CHARACTER_SELECTED: &str = "log.character.selected";
pub(crate) const LOG_SKILL_EQUIPPED: &str = "log.skill.equipped";
pub(crate) const LOG_SKILL_CLEARED: &str = "log.skill.cleared";
pub(crate) const LOG_SKILL_USED: &str = "log.skill.used";
pub(crate) const LOG_SKILL_BAD: &str = "log.skill.bad";
pub(crate) const LOG_SKILL_MISUSED: &str = "log.skill.misused";
pub(crate) const LOG_SKILL_EMPTY: &str = "log.skill.empty";
pub(crate) const LOG_MAP_OPEN: &str = "log.map.open";
pub(crate) const LOG_LOCATION_ENTERED: &str = "log.location.entered";
pub(crate) const LOG_LOCATION_LOCKED: &str = "log.location.locked";
pub(crate) const LOG_LOCATION_EMPTY: &str = "log.location.empty";
pub(crate) const LOG_SCENARIO_START: &str = "log.scenario.start";
pub(crate) const LOG_CHOICE: &str = "log.choice";
pub(crate) const LOG_OUTCOME_CORRECT: &str = "log.outcome.correct";
pub(crate) const LOG_OUTCOME_WRONG: &str = "log.outcome.wrong";
pub(crate) const LOG_ACT2_START: &str = "log.act2.start";
pub(crate) const LOG_ACT3_LOCKED: &str = "log.act3.locked";
pub(crate) const LOG_ACT3_START: &str = "log.act3.start";
pub(crate) const LOG_ACT_MISMATCH: &str = "log.act.mismatch";
pub(crate) const LOG_VICTORY: &str = "log.victory";
pub(crate) const LOG_GAME_OVER: &str = "log.game-over";

// Scene transition keys ---------------------------------------------------------
pub(crate) const SCENE_ACT2_TITLE: &str = "scene.act2.title";
pub(crate) const SCENE_ACT2_SUBTITLE: &str = "scene.act2.subtitle";
pub(crate) const SCENE_ACT3_TITLE: &str = "scene.act3.title";
pub(crate) const SCENE_ACT3_SUBTITLE: &str = "scene.act3.subtitle";
