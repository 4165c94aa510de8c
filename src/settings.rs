//! Game settings and preferences
//!
//! Stored by the host; this module only defines the shape and its JSON form.

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// How a tap is turned into a push direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlScheme {
    /// Side is judged against the pole's current lean
    #[default]
    Angle,
    /// Side is judged against the screen centre
    Screen,
}

impl ControlScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Angle => "Angle",
            ControlScheme::Screen => "Screen",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "angle" => Some(ControlScheme::Angle),
            "screen" => Some(ControlScheme::Screen),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub control_scheme: ControlScheme,
    /// Flip the push direction of taps
    pub invert: bool,
    /// Show a circle where each tap landed
    pub visual_feedback: bool,
    /// Difficulty applied at the next session start
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_scheme: ControlScheme::Angle,
            invert: false,
            visual_feedback: true,
            difficulty: Difficulty::Medium,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// +1 normally, -1 when taps are inverted
    pub fn invert_scalar(&self) -> f32 {
        if self.invert { -1.0 } else { 1.0 }
    }
}
