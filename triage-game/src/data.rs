use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level chapter of a playthrough. Ordering follows story order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Act {
    #[default]
    #[serde(rename = "ACT_1_TICKET")]
    Act1Ticket,
    #[serde(rename = "ACT_2_PERSPECTIVE")]
    Act2Perspective,
    #[serde(rename = "ACT_3_BOSS")]
    Act3Boss,
    #[serde(rename = "ACT_4_EPILOGUE")]
    Act4Epilogue,
}

impl Act {
    pub const ALL: [Self; 4] = [
        Self::Act1Ticket,
        Self::Act2Perspective,
        Self::Act3Boss,
        Self::Act4Epilogue,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Act1Ticket => "ACT_1_TICKET",
            Self::Act2Perspective => "ACT_2_PERSPECTIVE",
            Self::Act3Boss => "ACT_3_BOSS",
            Self::Act4Epilogue => "ACT_4_EPILOGUE",
        }
    }

    /// The act that follows this one, if any. Acts never move backwards.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Act1Ticket => Some(Self::Act2Perspective),
            Self::Act2Perspective => Some(Self::Act3Boss),
            Self::Act3Boss => Some(Self::Act4Epilogue),
            Self::Act4Epilogue => None,
        }
    }
}

impl fmt::Display for Act {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Act {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|act| act.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioKind {
    Triage,
    ModelFix,
    Decrypt,
    Puzzle,
    Memory,
    Reflex,
}

impl ScenarioKind {
    /// Scenarios resolved by a minigame report rather than an option pick.
    #[must_use]
    pub const fn is_minigame(self) -> bool {
        !matches!(self, Self::Triage)
    }
}

/// ITSM classification carried by an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionKind {
    Incident,
    Request,
    Change,
    Inquiry,
}

/// A selectable choice within a scenario.
///
/// `is_correct` has no serde default: content that omits it fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOption {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub outcome: String,
    #[serde(default)]
    pub quality_change: i32,
    #[serde(default)]
    pub morale_change: i32,
    pub is_correct: bool,
}

/// A single narrative decision point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub act: Act,
    #[serde(rename = "type")]
    pub kind: ScenarioKind,
    pub title: String,
    #[serde(default)]
    pub environment: String,
    pub description: String,
    /// Map location that hosts this scenario.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub options: Vec<ScenarioOption>,
    #[serde(default)]
    pub success_message: Option<String>,
    #[serde(default)]
    pub failure_message: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<u32>,
    #[serde(default)]
    pub target_word: Option<String>,
}

impl Scenario {
    #[must_use]
    pub fn option(&self, index: usize) -> Option<&ScenarioOption> {
        self.options.get(index)
    }

    #[must_use]
    pub fn option_by_label(&self, label: &str) -> Option<&ScenarioOption> {
        self.options.iter().find(|option| option.label == label)
    }

    /// First option flagged correct. Triage content guarantees exactly one.
    #[must_use]
    pub fn correct_option(&self) -> Option<&ScenarioOption> {
        self.options.iter().find(|option| option.is_correct)
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|option| option.is_correct).count()
    }

    /// Difficulty with the documented floor of 1.
    #[must_use]
    pub fn difficulty(&self) -> u32 {
        self.difficulty_level.unwrap_or(1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_from_json_reads_typed_options() {
        let json = r#"{
            "id": "act1_1",
            "act": "ACT_1_TICKET",
            "type": "TRIAGE",
            "title": "Printer Smoke",
            "description": "The floor printer is smoking.",
            "options": [
                {
                    "label": "Log an incident",
                    "type": "INCIDENT",
                    "outcome": "Service restored quickly.",
                    "quality_change": 20,
                    "morale_change": 5,
                    "is_correct": true
                },
                {
                    "label": "Raise a change",
                    "type": "CHANGE",
                    "outcome": "The CAB meets next week.",
                    "quality_change": -15,
                    "is_correct": false
                }
            ]
        }"#;

        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.act, Act::Act1Ticket);
        assert_eq!(scenario.kind, ScenarioKind::Triage);
        assert_eq!(scenario.correct_count(), 1);
        assert_eq!(
            scenario.correct_option().map(|o| o.kind),
            Some(OptionKind::Incident)
        );
        assert_eq!(scenario.option(1).map(|o| o.morale_change), Some(0));
        assert_eq!(scenario.difficulty(), 1);
    }

    #[test]
    fn option_without_correctness_flag_is_rejected() {
        let json = r#"{
            "label": "Shrug",
            "type": "INQUIRY",
            "outcome": "Nothing happens."
        }"#;
        assert!(serde_json::from_str::<ScenarioOption>(json).is_err());
    }

    #[test]
    fn acts_only_move_forward() {
        assert_eq!(Act::Act1Ticket.next(), Some(Act::Act2Perspective));
        assert_eq!(Act::Act4Epilogue.next(), None);
        assert!(Act::Act1Ticket < Act::Act3Boss);
        assert_eq!("ACT_3_BOSS".parse::<Act>(), Ok(Act::Act3Boss));
        assert!("ACT_9".parse::<Act>().is_err());
    }

    #[test]
    fn minigame_kinds_are_flagged() {
        assert!(!ScenarioKind::Triage.is_minigame());
        assert!(ScenarioKind::Decrypt.is_minigame());
        assert!(ScenarioKind::Reflex.is_minigame());
    }
}
