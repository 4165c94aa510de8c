//! Pole Balance - keep a pivoting pole upright against gravity and enemies
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pole dynamics, enemies, spawning)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{ControlScheme, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame the clock will accept before capping
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Pole rotation limit in degrees (either side of vertical)
    pub const MAX_ROTATION: f32 = 90.0;
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_angle_deg(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Interpolate between two angles (degrees) along the shortest arc.
///
/// `alpha` is clamped to [0, 1]. The result is not normalized, so
/// interpolating 170 -> -170 passes through 180 rather than 0.
#[inline]
pub fn lerp_angle_deg(from: f32, to: f32, alpha: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    from + delta * alpha.clamp(0.0, 1.0)
}

/// Sign that treats zero as positive
#[inline]
pub fn sign(x: f32) -> f32 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

/// Unit vector along a pole leaning `angle_deg` clockwise from vertical
#[inline]
pub fn pole_direction(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.sin(), rad.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle_deg() {
        assert!((normalize_angle_deg(190.0) + 170.0).abs() < 1e-4);
        assert!((normalize_angle_deg(-190.0) - 170.0).abs() < 1e-4);
        assert!((normalize_angle_deg(45.0) - 45.0).abs() < 1e-4);
        assert!((normalize_angle_deg(180.0) + 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_lerp_angle_takes_short_way() {
        assert!((lerp_angle_deg(10.0, 20.0, 0.5) - 15.0).abs() < 1e-4);
        // 170 -> -170 is 20 degrees through 180, not 340 through 0
        assert!((lerp_angle_deg(170.0, -170.0, 0.5) - 180.0).abs() < 1e-4);
        assert!((lerp_angle_deg(-170.0, 170.0, 0.5) + 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_lerp_angle_clamps_alpha() {
        assert!((lerp_angle_deg(0.0, 30.0, 2.0) - 30.0).abs() < 1e-4);
        assert!(lerp_angle_deg(0.0, 30.0, -1.0).abs() < 1e-4);
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(-0.5), -1.0);
        assert_eq!(sign(0.0), 1.0);
        assert_eq!(sign(3.0), 1.0);
    }

    #[test]
    fn test_pole_direction() {
        let up = pole_direction(0.0);
        assert!((up - Vec2::Y).length() < 1e-5);
        // Positive angle leans right (clockwise)
        let right = pole_direction(90.0);
        assert!((right - Vec2::X).length() < 1e-5);
        assert!(pole_direction(-30.0).x < 0.0);
    }
}
