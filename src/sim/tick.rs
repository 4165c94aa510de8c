//! Frame and fixed-step drivers
//!
//! A frame applies input, runs zero or more fixed ticks, then interpolates
//! the pole angle for rendering. Within a tick, enemies move and collide
//! before the pole integrates, so a hit lands in the same step's force.

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState};
use crate::settings::{ControlScheme, Settings};
use crate::tuning::PoleTuning;
use crate::{pole_direction, sign};

/// Lean beyond which the angle scheme judges taps against a pole pulled
/// back toward vertical
const STEEP_LEAN: f32 = 65.0;
/// How far the reference direction is pulled back
const STEEP_LEAN_CORRECTION: f32 = 15.0;
/// Minimum seconds between demo bot taps
const BOT_TAP_COOLDOWN: f32 = 0.25;
/// Lean the demo bot tolerates before reacting
const BOT_DEADZONE: f32 = 3.0;

/// Input for a single render frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Primary tap this frame, in world space
    pub tap: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - bot balances the pole
    pub idle_mode: bool,
}

/// Force a tap produces. Taps push the pole away from the side they land
/// on, so a tap right of the pole gives a negative (counter-clockwise) push.
pub fn tap_force(tap: Vec2, rendered_angle: f32, pole: &PoleTuning, settings: &Settings) -> f32 {
    let right_of_pole = match settings.control_scheme {
        ControlScheme::Screen => tap.x > 0.0,
        ControlScheme::Angle => {
            let reference = if rendered_angle > STEEP_LEAN {
                rendered_angle - STEEP_LEAN_CORRECTION
            } else if rendered_angle < -STEEP_LEAN {
                rendered_angle + STEEP_LEAN_CORRECTION
            } else {
                rendered_angle
            };
            pole_direction(reference).perp_dot(tap - pole.pivot) < 0.0
        }
    };
    let push = if right_of_pole { -1.0 } else { 1.0 };
    push * pole.tap_force * settings.invert_scalar()
}

/// Apply a tap to the pole and record feedback
pub fn apply_tap(state: &mut GameState, tap: Vec2) {
    let force = tap_force(tap, state.rendered_angle, state.pole.tuning(), &state.settings);
    state.pole.add_force(force);
    state.events.push(GameEvent::Tap { position: tap });
    if state.settings.visual_feedback {
        state.spawn_touch_circle(tap);
    }
    log::trace!("Tap at ({:.2}, {:.2}) -> force {:+}", tap.x, tap.y, force);
}

/// Where the demo bot taps this frame, if anywhere
fn bot_tap(state: &GameState) -> Option<Vec2> {
    if state.bot_cooldown > 0.0 {
        return None;
    }
    let angle = state.rendered_angle;
    let falling = angle * state.pole.rotational_velocity() > 0.0;
    if angle.abs() < BOT_DEADZONE || !falling {
        return None;
    }

    // Tap on the lean side to push it back (mirrored when taps are inverted)
    let tuning = state.pole.tuning();
    let side = sign(angle) * state.settings.invert_scalar();
    let mid = tuning.pivot + pole_direction(angle) * tuning.length * 0.5;
    Some(mid + Vec2::new(side * 2.0, 0.0))
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let dt = dt.max(0.0);
    state.time_ticks += 1;
    state.elapsed += dt;

    state.director.update(
        dt,
        state.phase,
        &state.playfield,
        &mut state.rng,
        &mut state.events,
    );
    state.director.step_enemies(dt);
    state
        .director
        .resolve_collisions(&mut state.pole, &mut state.events);
    state.director.cull(&state.playfield, &mut state.events);

    state.pole.step_fixed(dt, &mut state.events);

    if state.pole.has_toppled() {
        state.phase = GamePhase::GameOver;
        let angle = state.pole.target_rotation();
        state.events.push(GameEvent::Toppled {
            angle,
            survived: state.elapsed,
        });
        log::info!("Pole toppled at {:+.0}° after {:.2}s", angle, state.elapsed);
        state.director.update(
            0.0,
            state.phase,
            &state.playfield,
            &mut state.rng,
            &mut state.events,
        );
    }
}

/// Run one render frame. Returns the angle to draw the pole at.
pub fn frame(state: &mut GameState, input: &FrameInput, real_dt: f32) -> f32 {
    if input.pause {
        state.toggle_pause();
    }

    if state.is_playing() {
        state.bot_cooldown = (state.bot_cooldown - real_dt.max(0.0)).max(0.0);
        let tap = if input.idle_mode { bot_tap(state) } else { input.tap };
        if let Some(tap) = tap {
            apply_tap(state, tap);
            if input.idle_mode {
                state.bot_cooldown = BOT_TAP_COOLDOWN;
            }
        }
    }

    state.clock.begin_frame(real_dt);
    while state.clock.should_step() {
        let dt = state.clock.fixed_dt;
        tick(state, dt);
    }

    if state.is_playing() {
        let angle = state.pole.interpolated_angle(state.clock.alpha());
        state.pole.set_rendered_angle(angle);
        state.rendered_angle = angle;
    }

    state.update_touch_circles(real_dt);
    state.rendered_angle
}
