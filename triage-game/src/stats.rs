//! The three bounded resources a playthrough is fought over.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    DEFAULT_START_MORALE, DEFAULT_START_QUALITY, DEFAULT_START_SLA, STAT_MAX, STAT_MIN,
};
use crate::numbers::round_f64_to_i32;

/// Constrain a stat value to `[0, 100]`.
///
/// Non-finite input (NaN, ±Infinity) collapses to `0` so a bad delta can never
/// poison later arithmetic.
#[must_use]
pub fn clamp_stat(value: f64) -> i32 {
    if !value.is_finite() {
        log::warn!("non-finite stat value {value}; clamping to {STAT_MIN}");
        return STAT_MIN;
    }
    round_f64_to_i32(value.clamp(f64::from(STAT_MIN), f64::from(STAT_MAX)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Sla,
    Morale,
    Quality,
}

impl StatKind {
    /// Fixed evaluation order used by the game-over check.
    pub const PRIORITY: [Self; 3] = [Self::Sla, Self::Morale, Self::Quality];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Sla => "sla",
            Self::Morale => "morale",
            Self::Quality => "quality",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sla => "SLA",
            Self::Morale => "MORALE",
            Self::Quality => "QUALITY",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub sla: i32,
    pub morale: i32,
    pub quality: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            sla: DEFAULT_START_SLA,
            morale: DEFAULT_START_MORALE,
            quality: DEFAULT_START_QUALITY,
        }
    }
}

impl Stats {
    /// Build a stat triple, clamping every component.
    #[must_use]
    pub fn new(sla: i32, morale: i32, quality: i32) -> Self {
        Self {
            sla: clamp_stat(f64::from(sla)),
            morale: clamp_stat(f64::from(morale)),
            quality: clamp_stat(f64::from(quality)),
        }
    }

    #[must_use]
    pub const fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Sla => self.sla,
            StatKind::Morale => self.morale,
            StatKind::Quality => self.quality,
        }
    }

    /// Apply a signed delta to one stat and clamp the result.
    #[must_use]
    pub fn with_delta(self, kind: StatKind, delta: i32) -> Self {
        let next = clamp_stat(f64::from(self.get(kind)) + f64::from(delta));
        match kind {
            StatKind::Sla => Self { sla: next, ..self },
            StatKind::Morale => Self {
                morale: next,
                ..self
            },
            StatKind::Quality => Self {
                quality: next,
                ..self
            },
        }
    }

    #[must_use]
    pub fn total(&self) -> i32 {
        self.sla + self.morale + self.quality
    }

    /// True when any stat has reached the failure floor.
    #[must_use]
    pub const fn any_depleted(&self) -> bool {
        self.sla <= STAT_MIN || self.morale <= STAT_MIN || self.quality <= STAT_MIN
    }
}
