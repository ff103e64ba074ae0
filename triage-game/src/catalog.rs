//! Static content catalog: characters, skills, locations and scenarios.
//!
//! Loaded once per session and never mutated afterwards. Validation happens at
//! load time so the reducer can trust every id it is handed by content.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::hash::Hasher;
use thiserror::Error;
use twox_hash::XxHash64;

use crate::characters::{Character, CharacterList};
use crate::config::RulesConfig;
use crate::data::{Act, Scenario, ScenarioKind};
use crate::locations::MapLocation;
use crate::skills::Skill;

const DEFAULT_CONTENT_DATA: &str = include_str!("../assets/data/content.json");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },
    #[error("scenario `{scenario}` repeats option label `{label}`")]
    DuplicateOptionLabel { scenario: String, label: String },
    #[error("triage scenario `{scenario}` has no options")]
    TriageWithoutOptions { scenario: String },
    #[error("triage scenario `{scenario}` has {count} correct options; exactly one is required")]
    TriageCorrectCount { scenario: String, count: usize },
    #[error("scenario `{scenario}` has difficulty 0; levels start at 1")]
    InvalidDifficulty { scenario: String },
    #[error("scenario `{scenario}` references unknown location `{location}`")]
    UnknownLocation { scenario: String, location: String },
    #[error("rules reference {kind} `{id}` which the catalog does not define")]
    MissingRuleTarget { kind: &'static str, id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContentCatalog {
    #[serde(default)]
    pub characters: CharacterList,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub locations: Vec<MapLocation>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl ContentCatalog {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and validate content from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or the content violates
    /// a catalog invariant.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let mut catalog: Self = serde_json::from_str(json)?;
        catalog.characters = CharacterList::ordered(std::mem::take(&mut catalog.characters.0));
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the content bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset is malformed.
    pub fn load_from_static() -> Result<Self, ContentError> {
        Self::from_json(DEFAULT_CONTENT_DATA)
    }

    /// Check structural invariants of the catalog.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ContentError> {
        ensure_unique("character", self.characters.iter().map(|c| c.id.as_str()))?;
        ensure_unique("skill", self.skills.iter().map(|s| s.id.as_str()))?;
        ensure_unique("location", self.locations.iter().map(|l| l.id.as_str()))?;
        ensure_unique("scenario", self.scenarios.iter().map(|s| s.id.as_str()))?;
        for scenario in &self.scenarios {
            self.validate_scenario(scenario)?;
        }
        Ok(())
    }

    fn validate_scenario(&self, scenario: &Scenario) -> Result<(), ContentError> {
        let mut labels = HashSet::new();
        for option in &scenario.options {
            if !labels.insert(option.label.as_str()) {
                return Err(ContentError::DuplicateOptionLabel {
                    scenario: scenario.id.clone(),
                    label: option.label.clone(),
                });
            }
        }
        if scenario.kind == ScenarioKind::Triage {
            if scenario.options.is_empty() {
                return Err(ContentError::TriageWithoutOptions {
                    scenario: scenario.id.clone(),
                });
            }
            let count = scenario.correct_count();
            if count != 1 {
                return Err(ContentError::TriageCorrectCount {
                    scenario: scenario.id.clone(),
                    count,
                });
            }
        }
        if scenario.difficulty_level == Some(0) {
            return Err(ContentError::InvalidDifficulty {
                scenario: scenario.id.clone(),
            });
        }
        if let Some(location) = &scenario.location
            && self.location(location).is_none()
        {
            return Err(ContentError::UnknownLocation {
                scenario: scenario.id.clone(),
                location: location.clone(),
            });
        }
        Ok(())
    }

    /// Check that every id the rules key on exists in this catalog.
    ///
    /// # Errors
    ///
    /// Returns the first rule target missing from the catalog.
    pub fn validate_rules(&self, rules: &RulesConfig) -> Result<(), ContentError> {
        let progression = &rules.progression;
        let scenario_ids = std::iter::once(&progression.act1_opener)
            .chain(progression.act2_core.iter())
            .chain(std::iter::once(&progression.boss_scenario));
        for id in scenario_ids {
            if self.scenario(id).is_none() {
                return Err(missing("scenario", id));
            }
        }
        for set in [
            &progression.starting,
            &progression.act2_unlocks,
            &progression.act3_unlocks,
        ] {
            if let Some(id) = set.locations.iter().find(|id| self.location(id).is_none()) {
                return Err(missing("location", id));
            }
            if let Some(id) = set.skills.iter().find(|id| self.skill(id).is_none()) {
                return Err(missing("skill", id));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.get_by_id(id)
    }

    #[must_use]
    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn location(&self, id: &str) -> Option<&MapLocation> {
        self.locations.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn scenarios_in(&self, act: Act) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().filter(move |s| s.act == act)
    }

    /// First scenario at `location` for `act` that has not been completed yet.
    #[must_use]
    pub fn scenario_for_location(
        &self,
        location: &str,
        act: Act,
        completed: &BTreeSet<String>,
    ) -> Option<&Scenario> {
        self.scenarios_in(act).find(|s| {
            s.location.as_deref() == Some(location) && !completed.contains(s.id.as_str())
        })
    }

    /// Stable fingerprint of the catalog contents, used to detect content drift.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = XxHash64::with_seed(0);
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        hasher.write(&bytes);
        hasher.finish()
    }
}

fn ensure_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ContentError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn missing(kind: &'static str, id: &str) -> ContentError {
    ContentError::MissingRuleTarget {
        kind,
        id: id.to_string(),
    }
}
