//! Rules configuration: timings, costs and the content ids progression keys on.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    BASE_SLA_COST, LOCATION_DATA_CENTER, LOCATION_SCHOOL, SCENARIO_ACT1_OPENER,
    SCENARIO_ACT2_CORE, SCENARIO_BOSS, SKILL_ACTIVE_LISTENING, SKILL_CHANGE_CALENDAR,
    SLA_DECAY_AMOUNT, SLA_DECAY_INTERVAL_MS, TRANSITION_SETTLE_MS, TRANSITION_TITLE_MS,
};

const DEFAULT_RULES_DATA: &str = include_str!("../assets/data/rules.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rules config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("rules config field `{field}` must be positive")]
    NonPositive { field: &'static str },
    #[error("rules config needs at least one act-2 core scenario")]
    EmptyCoreSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayCfg {
    pub amount: i32,
    pub interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionCfg {
    pub title_ms: u64,
    pub settle_ms: u64,
}

/// Ids granted when an act opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UnlockSet {
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionCfg {
    pub act1_opener: String,
    pub act2_core: Vec<String>,
    pub boss_scenario: String,
    #[serde(default)]
    pub starting: UnlockSet,
    #[serde(default)]
    pub act2_unlocks: UnlockSet,
    #[serde(default)]
    pub act3_unlocks: UnlockSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub base_sla_cost: i32,
    pub decay: DecayCfg,
    pub transitions: TransitionCfg,
    pub progression: ProgressionCfg,
}

impl Default for RulesConfig {
    fn default() -> Self {
        serde_json::from_str(DEFAULT_RULES_DATA).unwrap_or_else(|err| {
            log::warn!("embedded rules failed to parse ({err}); using built-in rules");
            Self::builtin()
        })
    }
}

impl RulesConfig {
    /// Rules assembled from compiled constants only.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            base_sla_cost: BASE_SLA_COST,
            decay: DecayCfg {
                amount: SLA_DECAY_AMOUNT,
                interval_ms: SLA_DECAY_INTERVAL_MS,
            },
            transitions: TransitionCfg {
                title_ms: TRANSITION_TITLE_MS,
                settle_ms: TRANSITION_SETTLE_MS,
            },
            progression: ProgressionCfg {
                act1_opener: SCENARIO_ACT1_OPENER.to_string(),
                act2_core: SCENARIO_ACT2_CORE.iter().map(ToString::to_string).collect(),
                boss_scenario: SCENARIO_BOSS.to_string(),
                starting: UnlockSet {
                    locations: vec![
                        "OFFICE".to_string(),
                        "SERVICE_DESK".to_string(),
                        "SERVER_ROOM".to_string(),
                    ],
                    skills: vec![
                        "KNOWLEDGE_BASE".to_string(),
                        "EXPIRED_ENERGY_DRINK".to_string(),
                        "OUTDATED_DOCUMENTATION".to_string(),
                        "BUGGY_SCRIPT".to_string(),
                    ],
                },
                act2_unlocks: UnlockSet {
                    locations: vec![LOCATION_SCHOOL.to_string()],
                    skills: vec![SKILL_ACTIVE_LISTENING.to_string()],
                },
                act3_unlocks: UnlockSet {
                    locations: vec![LOCATION_DATA_CENTER.to_string()],
                    skills: vec![SKILL_CHANGE_CALENDAR.to_string()],
                },
            },
        }
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::default()
    }

    /// Parse and validate rules from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a numeric field is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// # Errors
    ///
    /// Returns an error when a cost, interval or the core scenario set is unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_sla_cost <= 0 {
            return Err(ConfigError::NonPositive {
                field: "base_sla_cost",
            });
        }
        if self.decay.amount <= 0 {
            return Err(ConfigError::NonPositive {
                field: "decay.amount",
            });
        }
        if self.decay.interval_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "decay.interval_ms",
            });
        }
        if self.progression.act2_core.is_empty() {
            return Err(ConfigError::EmptyCoreSet);
        }
        Ok(())
    }
}
