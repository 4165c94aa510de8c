//! Pole rotational dynamics
//!
//! The pole pivots at its base. Every fixed step, gravity pulls it further
//! from vertical (scaled up over time) while taps and enemy hits push it
//! through a per-step force accumulator. Rotation is in degrees, positive
//! is clockwise (leaning toward +x).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Feedback, GameEvent};
use crate::tuning::PoleTuning;
use crate::{lerp_angle_deg, pole_direction, sign};

/// Mass of a freshly initialised pole
pub const BASE_MASS: f32 = 1.0;

/// Collision data handed from an enemy to the pole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f32,
    /// Whether the enemy sticks and adds its mass
    pub attach: bool,
}

/// The balancing pole
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pole {
    /// Force accumulated since the last fixed step
    total_force: f32,
    /// Degrees per second
    rotational_velocity: f32,
    mass: f32,
    /// Target rotation before the last fixed step
    prev_rotation: f32,
    /// Rotation after the last fixed step, clamped to ±max_angle
    target_rotation: f32,
    /// Last rendered (interpolated) rotation, drives the gravity term
    actual_rotation: f32,
    gravity_scale: f32,
    /// Seconds since the last gravity increment
    gravity_timer: f32,
    tuning: PoleTuning,
}

impl Pole {
    pub fn new(tuning: PoleTuning) -> Self {
        Self {
            total_force: 0.0,
            rotational_velocity: 0.0,
            mass: BASE_MASS,
            prev_rotation: 0.0,
            target_rotation: 0.0,
            actual_rotation: 0.0,
            gravity_scale: 1.0,
            gravity_timer: 0.0,
            tuning,
        }
    }

    /// Reset to upright and give it a random push to start it falling
    pub fn init(&mut self, rng: &mut impl Rng, fx: &mut dyn Feedback) {
        let tuning = self.tuning.clone();
        *self = Self::new(tuning);
        fx.emit(GameEvent::GravityScaleChanged(self.gravity_scale));

        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.add_force(direction * self.tuning.starting_force);
        log::info!("Pole initialised, starting push {:+}", self.total_force);
    }

    /// Accumulate a force for this step. Positive is clockwise.
    pub fn add_force(&mut self, force: f32) {
        self.add_force_at(force, 1.0);
    }

    /// Accumulate a force applied at a height along the pole (0 = pivot,
    /// 1 = tip). Torque is flat: the height does not scale the force.
    pub fn add_force_at(&mut self, force: f32, _vertical_position: f32) {
        self.total_force += force;
    }

    /// Handle an enemy hit. Returns the force contributed.
    pub fn collide(&mut self, impact: Impact, fx: &mut dyn Feedback) -> f32 {
        let direction = if impact.velocity.x < 0.0 { -1.0 } else { 1.0 };
        let force = direction * self.tuning.collision_force;
        self.add_force_at(force, 0.5);

        if impact.attach {
            self.add_mass(impact.mass, fx);
        } else {
            fx.emit(GameEvent::PoleHit {
                position: impact.position,
            });
        }
        log::debug!(
            "Pole hit at ({:.2}, {:.2}): force {:+}, attach {}",
            impact.position.x,
            impact.position.y,
            force,
            impact.attach
        );
        force
    }

    /// Add mass at the centre of the pole
    pub fn add_mass(&mut self, amount: f32, fx: &mut dyn Feedback) {
        self.add_mass_at(amount, 0.5, 1, fx);
    }

    /// Add mass at a height and side of the pole. Placement is recorded by
    /// callers for rendering only; the torque model treats the pole as a
    /// single point mass.
    pub fn add_mass_at(
        &mut self,
        amount: f32,
        _vertical_position: f32,
        _side: i32,
        fx: &mut dyn Feedback,
    ) {
        self.mass += amount.max(0.0);
        fx.emit(GameEvent::MassStuck { mass: self.mass });
    }

    /// Integrate one fixed step
    pub fn step_fixed(&mut self, dt: f32, fx: &mut dyn Feedback) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let max_angle = self.tuning.max_angle;

        let angle = self.actual_rotation;
        let grav_acceleration = sign(angle)
            * self.tuning.gravity
            * self.gravity_scale
            * self.tuning.resistance
            * angle.abs().to_radians().sin();
        let rotational_acceleration = grav_acceleration + self.total_force / self.mass;
        self.rotational_velocity += rotational_acceleration * dt;

        self.prev_rotation = self.target_rotation;
        self.target_rotation = (self.target_rotation + self.rotational_velocity * dt)
            .clamp(-max_angle, max_angle);

        self.total_force = 0.0;

        self.gravity_timer += dt;
        let increments = self.gravity_increments_due();
        if increments > 0 {
            let interval = f64::from(self.tuning.gravity_interval);
            let remainder = f64::from(self.gravity_timer) - increments as f64 * interval;
            self.gravity_timer = remainder.clamp(0.0, interval) as f32;
            let added = increments as f64 * f64::from(self.tuning.gravity_increment);
            self.gravity_scale += added as f32;
            log::info!(
                "Gravity scale increased to {:.1} ({} interval(s))",
                self.gravity_scale,
                increments
            );
            fx.emit(GameEvent::GravityScaleChanged(self.gravity_scale));
        }
    }

    /// Whole intervals the gravity timer has strictly passed. A timer sitting
    /// exactly on a multiple of the interval has not passed the last one.
    fn gravity_increments_due(&self) -> u64 {
        let interval = f64::from(self.tuning.gravity_interval);
        let timer = f64::from(self.gravity_timer);
        if interval.is_nan() || interval <= 0.0 || timer <= interval {
            return 0;
        }
        let intervals = (timer / interval).ceil() - 1.0;
        if intervals.is_finite() {
            intervals as u64
        } else {
            0
        }
    }

    /// Rotation between the last two fixed steps, `alpha` of the way in
    pub fn interpolated_angle(&self, alpha: f32) -> f32 {
        lerp_angle_deg(self.prev_rotation, self.target_rotation, alpha)
    }

    /// Record the angle that was rendered this frame
    pub fn set_rendered_angle(&mut self, angle: f32) {
        let max_angle = self.tuning.max_angle;
        self.actual_rotation = angle.clamp(-max_angle, max_angle);
    }

    /// Whether the pole has fallen to the rotation limit
    pub fn has_toppled(&self) -> bool {
        self.target_rotation.abs() >= self.tuning.max_angle
    }

    /// Tip position at the fixed-step rotation
    pub fn tip(&self) -> Vec2 {
        self.tuning.pivot + pole_direction(self.target_rotation) * self.tuning.length
    }

    pub fn tuning(&self) -> &PoleTuning {
        &self.tuning
    }

    pub fn pending_force(&self) -> f32 {
        self.total_force
    }

    pub fn rotational_velocity(&self) -> f32 {
        self.rotational_velocity
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn target_rotation(&self) -> f32 {
        self.target_rotation
    }

    pub fn prev_rotation(&self) -> f32 {
        self.prev_rotation
    }

    pub fn rendered_angle(&self) -> f32 {
        self.actual_rotation
    }

    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    pub fn gravity_timer(&self) -> f32 {
        self.gravity_timer
    }
}

impl Default for Pole {
    fn default() -> Self {
        Self::new(PoleTuning::default())
    }
}
