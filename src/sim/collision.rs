//! Collision detection between enemies and the pole
//!
//! The pole is a capsule: a segment from the pivot to the tip, thickened by
//! its half width. Enemies are circles.

use glam::Vec2;

use crate::pole_direction;
use crate::tuning::PoleTuning;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the pole centreline
    pub point: Vec2,
    /// Unit normal from the pole toward the circle centre
    pub normal: Vec2,
    /// Overlap depth
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Closest point to `p` on the segment `a`-`b`
#[inline]
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Check a circle against the pole at `angle_deg`
pub fn circle_pole_collision(
    center: Vec2,
    radius: f32,
    pole: &PoleTuning,
    angle_deg: f32,
) -> CollisionResult {
    let base = pole.pivot;
    let tip = base + pole_direction(angle_deg) * pole.length;

    let point = closest_point_on_segment(center, base, tip);
    let offset = center - point;
    let dist = offset.length();
    let reach = radius + pole.half_width;

    if dist >= reach {
        return CollisionResult::miss();
    }

    // Centre exactly on the centreline: push out sideways from the pole
    let normal = if dist > f32::EPSILON {
        offset / dist
    } else {
        let dir = pole_direction(angle_deg);
        Vec2::new(dir.y, -dir.x)
    };

    CollisionResult {
        hit: true,
        point,
        normal,
        penetration: reach - dist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pole() -> PoleTuning {
        PoleTuning {
            pivot: Vec2::ZERO,
            length: 10.0,
            half_width: 0.25,
            ..Default::default()
        }
    }

    #[test]
    fn test_closest_point_clamps_to_ends() {
        let a = Vec2::ZERO;
        let b = Vec2::new(0.0, 10.0);
        assert_eq!(closest_point_on_segment(Vec2::new(1.0, 5.0), a, b), Vec2::new(0.0, 5.0));
        assert_eq!(closest_point_on_segment(Vec2::new(1.0, -5.0), a, b), a);
        assert_eq!(closest_point_on_segment(Vec2::new(1.0, 50.0), a, b), b);
        assert_eq!(closest_point_on_segment(Vec2::ONE, a, a), a);
    }

    #[test]
    fn test_hit_upright_pole_from_left() {
        let result = circle_pole_collision(Vec2::new(-0.6, 4.0), 0.5, &pole(), 0.0);
        assert!(result.hit);
        assert!((result.point - Vec2::new(0.0, 4.0)).length() < 1e-5);
        assert!((result.normal - Vec2::new(-1.0, 0.0)).length() < 1e-5);
        assert!((result.penetration - 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_miss_beside_pole() {
        let result = circle_pole_collision(Vec2::new(-1.0, 4.0), 0.5, &pole(), 0.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_miss_above_tip() {
        let result = circle_pole_collision(Vec2::new(0.0, 11.0), 0.5, &pole(), 0.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_leaning_pole_moves_contact() {
        // Leaning 90° right the pole lies along +x
        let flat = circle_pole_collision(Vec2::new(5.0, 0.5), 0.5, &pole(), 90.0);
        assert!(flat.hit);
        let upright = circle_pole_collision(Vec2::new(5.0, 0.5), 0.5, &pole(), 0.0);
        assert!(!upright.hit);
    }

    #[test]
    fn test_centre_on_centreline_has_normal() {
        let result = circle_pole_collision(Vec2::new(0.0, 3.0), 0.5, &pole(), 0.0);
        assert!(result.hit);
        assert!((result.normal.length() - 1.0).abs() < 1e-5);
    }
}
