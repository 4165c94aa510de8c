//! Data-driven game balance
//!
//! Every field falls back to its default when missing, so a tuning file only
//! needs to name the values it changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_ROTATION;

/// Complete balance table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub pole: PoleTuning,
    pub enemy: EnemyTuning,
    pub spawn: SpawnTuning,
}

impl Tuning {
    /// Parse a (possibly partial) tuning table from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Pole physics and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoleTuning {
    /// Gravitational acceleration (degrees/s² at 90° lean, before scaling)
    pub gravity: f32,
    /// Multiplier on the gravity term
    pub resistance: f32,
    /// Magnitude of the random push applied on init
    pub starting_force: f32,
    /// Force applied per player tap
    pub tap_force: f32,
    /// Force applied per enemy collision
    pub collision_force: f32,
    /// Seconds between gravity scale increments
    pub gravity_interval: f32,
    /// Gravity scale added each interval
    pub gravity_increment: f32,
    /// Lean in degrees at which the pole has fallen over
    pub max_angle: f32,
    /// World-space pivot at the base of the pole
    pub pivot: Vec2,
    pub length: f32,
    pub half_width: f32,
}

impl Default for PoleTuning {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            resistance: 1.0,
            starting_force: 120.0,
            tap_force: 1200.0,
            collision_force: 5.0,
            gravity_interval: 30.0,
            gravity_increment: 0.1,
            max_angle: MAX_ROTATION,
            pivot: Vec2::new(0.0, -4.5),
            length: 9.0,
            half_width: 0.25,
        }
    }
}

/// Enemy flight and body parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Horizontal speed range (always toward the opposite edge)
    pub x_speed: (f32, f32),
    /// Vertical speed range (always upward)
    pub y_speed: (f32, f32),
    pub mass: f32,
    pub radius: f32,
    /// Height enemies enter the playfield at
    pub spawn_y: f32,
    /// Visual rotation range in degrees, [min, max)
    pub rotation: (f32, f32),
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            x_speed: (10.0, 25.0),
            y_speed: (5.0, 20.0),
            mass: 1.0,
            radius: 0.5,
            spawn_y: 0.0,
            rotation: (-90.0, 90.0),
        }
    }
}

/// Spawn cadence and variant odds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Seconds between spawns at the Medium multiplier
    pub base_interval: f32,
    /// One spawn in `stick_odds` is a Stick enemy
    pub stick_odds: u32,
    /// Number of interchangeable entry sound cues
    pub entry_cues: u8,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_interval: 1.5,
            stick_odds: 4,
            entry_cues: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "pole": { "gravity": 20.0 } }"#).unwrap();
        assert_eq!(tuning.pole.gravity, 20.0);
        assert_eq!(tuning.pole.tap_force, 1200.0);
        assert_eq!(tuning.pole.max_angle, 90.0);
        assert_eq!(tuning.spawn, SpawnTuning::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ pole: ").is_err());
    }
}
