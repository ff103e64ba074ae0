//! Skills (consumable items) and the per-playthrough inventory.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::data::Act;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub desc: String,
    #[serde(default)]
    pub icon: String,
    /// Act this skill is tuned for; using it elsewhere costs `sla_penalty`.
    pub target_act: Act,
    #[serde(default)]
    pub sla_penalty: i32,
    #[serde(default)]
    pub is_bad_item: bool,
    #[serde(default)]
    pub quality_effect: Option<i32>,
    #[serde(default)]
    pub morale_effect: Option<i32>,
}

impl Skill {
    #[must_use]
    pub fn is_misused_in(&self, act: Act) -> bool {
        self.target_act != act
    }
}

/// Skill id to remaining count. A count of zero makes the skill unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<String, u32>);

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One of each listed skill.
    #[must_use]
    pub fn starter<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self(ids.into_iter().map(|id| (id.to_string(), 1)).collect())
    }

    #[must_use]
    pub fn count(&self, id: &str) -> u32 {
        self.0.get(id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.count(id) > 0
    }

    #[must_use]
    pub fn with_added(mut self, id: &str, amount: u32) -> Self {
        let entry = self.0.entry(id.to_string()).or_insert(0);
        *entry = entry.saturating_add(amount);
        self
    }

    /// Decrement a count, returning `None` when nothing is left to consume.
    #[must_use]
    pub fn consumed(mut self, id: &str) -> Option<Self> {
        let entry = self.0.get_mut(id).filter(|count| **count > 0)?;
        *entry -= 1;
        Some(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(id, count)| (id.as_str(), *count))
    }
}

/// Result of consuming a skill through [`crate::journey::consume_skill`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillUse {
    pub quality_delta: i32,
    pub morale_delta: i32,
    pub sla_penalty: i32,
    pub bad_item: bool,
    pub misused: bool,
}

impl SkillUse {
    /// Effects of consuming `skill` while the story sits in `act`.
    #[must_use]
    pub fn evaluate(skill: &Skill, act: Act) -> Self {
        let misused = skill.is_misused_in(act);
        Self {
            quality_delta: skill.quality_effect.unwrap_or(0),
            morale_delta: skill.morale_effect.unwrap_or(0),
            sla_penalty: if misused { skill.sla_penalty.max(0) } else { 0 },
            bad_item: skill.is_bad_item,
            misused,
        }
    }
}
