//! Enemies that fly in from the screen edges
//!
//! Enemies move in straight lines with no gravity. The first contact with
//! the pole is resolved according to the variant: Bounce flips its
//! horizontal velocity and keeps flying, Stick attaches and adds its mass.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::CollisionResult;
use super::pole::Impact;
use crate::tuning::EnemyTuning;

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign of the horizontal velocity (toward the opposite edge)
    pub fn inward(&self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Collision behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Reflects off the pole and flies away
    Bounce,
    /// Attaches to the pole and adds its mass
    Stick,
}

/// What happened when an enemy touched the pole
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Enemy reflected and keeps flying
    Bounced(Impact),
    /// Enemy attached; its owner should remove it
    Attached(Impact),
}

impl Contact {
    pub fn impact(&self) -> Impact {
        match self {
            Contact::Bounced(impact) | Contact::Attached(impact) => *impact,
        }
    }
}

/// A flying enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub side: Side,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual rotation in degrees
    pub rotation: f32,
    pub mass: f32,
    pub radius: f32,
    /// Set once the enemy has hit the pole
    pub consumed: bool,
}

impl Enemy {
    /// Spawn at the given edge (`spawn_x` is the absolute x of the edge)
    pub fn spawn(
        id: u32,
        side: Side,
        kind: EnemyKind,
        spawn_x: f32,
        tuning: &EnemyTuning,
        rng: &mut impl Rng,
    ) -> Self {
        let speed_x = random_in(rng, tuning.x_speed);
        let speed_y = random_in(rng, tuning.y_speed);
        let rotation = random_in(rng, tuning.rotation);

        Self {
            id,
            side,
            kind,
            pos: Vec2::new(-side.inward() * spawn_x.abs(), tuning.spawn_y),
            vel: Vec2::new(side.inward() * speed_x.abs(), speed_y.abs()),
            rotation,
            mass: tuning.mass,
            radius: tuning.radius,
            consumed: false,
        }
    }

    /// Straight-line motion
    pub fn step_fixed(&mut self, dt: f32) {
        self.pos += self.vel * dt.max(0.0);
    }

    /// Whether the enemy has left the playfield
    pub fn is_out_of_bounds(&self, half_width: f32, floor_y: f32) -> bool {
        self.pos.x.abs() > half_width || self.pos.y < floor_y
    }

    /// Resolve contact with the pole. Returns `None` on a miss or if this
    /// enemy already collided.
    pub fn resolve_collision(&mut self, hit: &CollisionResult) -> Option<Contact> {
        if self.consumed || !hit.hit {
            return None;
        }
        self.consumed = true;

        let impact = Impact {
            position: hit.point,
            velocity: self.vel,
            mass: self.mass,
            attach: self.kind == EnemyKind::Stick,
        };
        match self.kind {
            EnemyKind::Bounce => {
                // Step out of the pole before flying back
                self.pos += hit.normal * hit.penetration;
                self.vel.x = -self.vel.x;
                Some(Contact::Bounced(impact))
            }
            EnemyKind::Stick => {
                self.vel = Vec2::ZERO;
                Some(Contact::Attached(impact))
            }
        }
    }
}

/// Uniform sample from an inclusive-exclusive range, tolerating min == max
fn random_in(rng: &mut impl Rng, (min, max): (f32, f32)) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}
