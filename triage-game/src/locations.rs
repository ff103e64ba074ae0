use serde::{Deserialize, Serialize};

use crate::data::Act;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationKind {
    Safe,
    Danger,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLocation {
    pub id: String,
    pub name: String,
    pub desc: String,
    /// Map placement in percent of the rendered map.
    pub x: f32,
    pub y: f32,
    #[serde(rename = "type")]
    pub kind: LocationKind,
    #[serde(default)]
    pub required_act: Option<Act>,
}

impl MapLocation {
    /// Whether the story has progressed far enough to visit this location.
    #[must_use]
    pub fn is_reachable_in(&self, act: Act) -> bool {
        self.required_act.is_none_or(|required| act >= required)
    }
}
