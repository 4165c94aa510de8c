//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod collision;
pub mod enemy;
pub mod pole;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::FixedStepClock;
pub use collision::{CollisionResult, circle_pole_collision, closest_point_on_segment};
pub use enemy::{Contact, Enemy, EnemyKind, Side};
pub use pole::{BASE_MASS, Impact, Pole};
pub use spawn::{Difficulty, SpawnDirector};
pub use state::{
    Feedback, GameEvent, GamePhase, GameState, NullFeedback, Playfield, TouchCircle, FLOOR_Y,
    SPAWN_MARGIN, TOUCH_CIRCLE_LIFETIME,
};
pub use tick::{FrameInput, apply_tap, frame, tap_force, tick};
