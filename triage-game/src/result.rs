//! End of game result calculation
use serde::{Deserialize, Serialize};

use crate::catalog::ContentCatalog;
use crate::constants::STAT_MAX;
use crate::endgame::GameOverReason;
use crate::numbers::{ratio, round_f64_to_i32};
use crate::state::{GameState, GameStatus, WrongAnswer};
use crate::stats::Stats;

/// Possible game ending types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// Boss scenario cleared
    Victory,
    /// SLA ran out
    SlaBreach,
    /// Team morale hit zero
    MoraleCollapse,
    /// Service quality hit zero
    QualityCollapse,
    /// Run still going
    InProgress,
}

impl Ending {
    #[must_use]
    pub const fn headline_key(self) -> &'static str {
        match self {
            Self::Victory => "result.headline.victory",
            Self::SlaBreach => "result.headline.sla",
            Self::MoraleCollapse => "result.headline.morale",
            Self::QualityCollapse => "result.headline.quality",
            Self::InProgress => "result.headline.in_progress",
        }
    }
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Victory => write!(f, "victory"),
            Self::SlaBreach => write!(f, "sla_breach"),
            Self::MoraleCollapse => write!(f, "morale_collapse"),
            Self::QualityCollapse => write!(f, "quality_collapse"),
            Self::InProgress => write!(f, "in_progress"),
        }
    }
}

/// Letter grade derived from the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    #[must_use]
    pub const fn from_score(score: i32) -> Self {
        match score {
            270.. => Self::S,
            210..=269 => Self::A,
            150..=209 => Self::B,
            90..=149 => Self::C,
            30..=89 => Self::D,
            _ => Self::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

/// Complete summary of a playthrough for the result screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub ending: Ending,
    pub headline_key: String,
    pub player_name: String,
    pub character_name: Option<String>,
    pub stats: Stats,
    pub turns: u32,
    pub answered: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub score: i32,
    pub grade: Grade,
    pub wrong_answers: Vec<WrongAnswer>,
}

/// Select the ending from the run status and the recorded game-over reason
#[must_use]
pub fn select_ending(state: &GameState) -> Ending {
    match state.status() {
        GameStatus::Won => Ending::Victory,
        GameStatus::Active => Ending::InProgress,
        GameStatus::Lost => match state.game_over_reason() {
            Some(GameOverReason::MoraleDepleted) => Ending::MoraleCollapse,
            Some(GameOverReason::QualityCollapsed) => Ending::QualityCollapse,
            Some(GameOverReason::SlaBreached) | None => Ending::SlaBreach,
        },
    }
}

/// Build the end-of-game report.
///
/// Score is the stat total weighted by decision accuracy, capped at three full
/// stats. A run with no decisions scores zero.
#[must_use]
pub fn result_summary(state: &GameState, catalog: &ContentCatalog) -> ResultSummary {
    let ending = select_ending(state);
    let answered = state.turn() as usize;
    let wrong = state.wrong_answers().len().min(answered);
    let correct = answered - wrong;
    let accuracy = ratio(correct, answered);
    let stats = state.stats();
    let score = round_f64_to_i32(f64::from(stats.total()) * accuracy).clamp(0, STAT_MAX * 3);
    ResultSummary {
        ending,
        headline_key: ending.headline_key().to_string(),
        player_name: state.player_name().to_string(),
        character_name: state
            .character()
            .and_then(|id| catalog.character(id))
            .map(|c| c.name.clone()),
        stats,
        turns: state.turn(),
        answered,
        correct,
        accuracy,
        score,
        grade: Grade::from_score(score),
        wrong_answers: state.wrong_answers().to_vec(),
    }
}
