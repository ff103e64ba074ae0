//! Terminal-state evaluation over the stat triple.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::STAT_MIN;
use crate::stats::{StatKind, Stats};

/// Which stat ran out first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    SlaBreached,
    MoraleDepleted,
    QualityCollapsed,
}

impl GameOverReason {
    #[must_use]
    pub const fn stat(self) -> StatKind {
        match self {
            Self::SlaBreached => StatKind::Sla,
            Self::MoraleDepleted => StatKind::Morale,
            Self::QualityCollapsed => StatKind::Quality,
        }
    }

    #[must_use]
    pub const fn from_stat(kind: StatKind) -> Self {
        match kind {
            StatKind::Sla => Self::SlaBreached,
            StatKind::Morale => Self::MoraleDepleted,
            StatKind::Quality => Self::QualityCollapsed,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SlaBreached => "game-over.sla",
            Self::MoraleDepleted => "game-over.morale",
            Self::QualityCollapsed => "game-over.quality",
        }
    }
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlaBreached => write!(f, "SLA breached: the clock ran out on your tickets"),
            Self::MoraleDepleted => write!(f, "MORALE depleted: the team has nothing left"),
            Self::QualityCollapsed => write!(f, "QUALITY collapsed: the service is beyond repair"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverCheck {
    pub is_game_over: bool,
    pub reason: Option<GameOverReason>,
}

impl GameOverCheck {
    const CLEAR: Self = Self {
        is_game_over: false,
        reason: None,
    };
}

/// Evaluate SLA, then morale, then quality; the first stat at or below zero wins.
#[must_use]
pub fn check_game_over(sla: i32, morale: i32, quality: i32) -> GameOverCheck {
    let stats = Stats {
        sla,
        morale,
        quality,
    };
    StatKind::PRIORITY
        .into_iter()
        .find(|kind| stats.get(*kind) <= STAT_MIN)
        .map_or(GameOverCheck::CLEAR, |kind| GameOverCheck {
            is_game_over: true,
            reason: Some(GameOverReason::from_stat(kind)),
        })
}

#[must_use]
pub fn check_stats(stats: &Stats) -> GameOverCheck {
    check_game_over(stats.sla, stats.morale, stats.quality)
}
