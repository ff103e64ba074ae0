//! Cosmetic scene transitions shown between acts.
//!
//! A transition starts on its title card, moves to the subtitle after
//! `title_ms`, and clears after `settle_ms`. Nothing in the rules waits on it.
use serde::{Deserialize, Serialize};

use crate::config::TransitionCfg;
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    Title,
    Subtitle,
}

impl TransitionPhase {
    /// How long this phase stays on screen before the next step fires.
    #[must_use]
    pub const fn hold_ms(self, cfg: &TransitionCfg) -> u64 {
        match self {
            Self::Title => cfg.title_ms,
            Self::Subtitle => cfg.settle_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneTransition {
    pub id: u64,
    pub title_key: String,
    pub subtitle_key: String,
    pub phase: TransitionPhase,
}

impl SceneTransition {
    /// Key currently on screen.
    #[must_use]
    pub fn visible_key(&self) -> &str {
        match self.phase {
            TransitionPhase::Title => &self.title_key,
            TransitionPhase::Subtitle => &self.subtitle_key,
        }
    }
}

/// Open a new transition, replacing any that is still on screen.
pub(crate) fn begin_scene(state: &mut GameState, title_key: &str, subtitle_key: &str) -> u64 {
    state.transition_seq += 1;
    let id = state.transition_seq;
    state.transition = Some(SceneTransition {
        id,
        title_key: title_key.to_string(),
        subtitle_key: subtitle_key.to_string(),
        phase: TransitionPhase::Title,
    });
    id
}

/// Step the transition `id` forward one phase.
///
/// Steps for a transition that has since been replaced or cleared are ignored.
#[must_use]
pub fn advance_transition(mut state: GameState, id: u64) -> GameState {
    let Some(current) = state.transition.as_mut().filter(|t| t.id == id) else {
        log::debug!("dropping stale transition step {id}");
        return state;
    };
    match current.phase {
        TransitionPhase::Title => current.phase = TransitionPhase::Subtitle,
        TransitionPhase::Subtitle => state.transition = None,
    }
    state
}
