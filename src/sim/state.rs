//! Game state and core simulation types
//!
//! `GameState` is the session owner: it holds the pole, the spawn director,
//! the playfield bounds and the phase flag the simulation reads each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::FixedStepClock;
use super::pole::Pole;
use super::spawn::SpawnDirector;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a run to start
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Pole fell over
    GameOver,
}

/// Fire-and-forget notifications for audio and UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player tapped at a world position
    Tap { position: Vec2 },
    /// A bouncing enemy hit the pole
    PoleHit { position: Vec2 },
    /// An enemy stuck to the pole; carries the new pole mass
    MassStuck { mass: f32 },
    /// A bounced enemy left the playfield
    EnemySwipedOff { id: u32 },
    /// An enemy spawned; `cue` picks one of the entry sounds
    EnemyEntered { id: u32, cue: u8 },
    /// Gravity scale changed; sent on init and once per step that crosses
    /// one or more intervals, carrying the new scale
    GravityScaleChanged(f32),
    /// Pole reached the rotation limit
    Toppled { angle: f32, survived: f32 },
}

/// Receiver for simulation notifications
pub trait Feedback {
    fn emit(&mut self, event: GameEvent);
}

impl Feedback for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl Feedback for NullFeedback {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Horizontal margin between the visible edge and the spawn line
pub const SPAWN_MARGIN: f32 = 2.0;
/// Enemies below this height are culled
pub const FLOOR_Y: f32 = -3.0;

/// Playfield bounds supplied by the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    /// Visible half width in world units
    pub half_width: f32,
    /// Enemies below this height are culled
    pub floor_y: f32,
}

impl Playfield {
    pub fn new(half_width: f32) -> Self {
        Self {
            half_width,
            floor_y: FLOOR_Y,
        }
    }

    /// Bounds of an orthographic camera (`ortho_size` is half the height)
    pub fn from_camera(ortho_size: f32, width: f32, height: f32) -> Self {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        Self::new(ortho_size * aspect)
    }

    /// |x| of the spawn line; enemies beyond it are out of bounds
    pub fn spawn_x(&self) -> f32 {
        self.half_width + SPAWN_MARGIN
    }
}

impl Default for Playfield {
    fn default() -> Self {
        // 16:9 screen, ortho size 5
        Self::from_camera(5.0, 16.0, 9.0)
    }
}

/// Seconds a touch circle stays on screen
pub const TOUCH_CIRCLE_LIFETIME: f32 = 0.5;

/// Visual marker where a tap landed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchCircle {
    pub id: u32,
    pub pos: Vec2,
    /// Seconds since the tap
    pub age: f32,
}

impl TouchCircle {
    /// 1 when fresh, 0 when expired
    pub fn life(&self) -> f32 {
        (1.0 - self.age / TOUCH_CIRCLE_LIFETIME).clamp(0.0, 1.0)
    }

    pub fn expired(&self) -> bool {
        self.age >= TOUCH_CIRCLE_LIFETIME
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub pole: Pole,
    pub director: SpawnDirector,
    pub playfield: Playfield,
    pub settings: Settings,
    pub clock: FixedStepClock,
    /// Seconds survived this run
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Angle shown in the last rendered frame
    pub rendered_angle: f32,
    pub touch_circles: Vec<TouchCircle>,
    /// Notifications since the last drain
    pub events: Vec<GameEvent>,
    /// Seconds until the demo bot may tap again
    pub bot_cooldown: f32,
    next_circle_id: u32,
}

impl GameState {
    /// Create a new session waiting in the menu
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let mut director = SpawnDirector::new(tuning.spawn.clone(), tuning.enemy.clone());
        director.set_difficulty(settings.difficulty);
        director.commit_difficulty();

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            pole: Pole::new(tuning.pole.clone()),
            director,
            playfield: Playfield::default(),
            settings,
            clock: FixedStepClock::default(),
            elapsed: 0.0,
            time_ticks: 0,
            rendered_angle: 0.0,
            touch_circles: Vec::new(),
            events: Vec::new(),
            bot_cooldown: 0.0,
            next_circle_id: 1,
        }
    }

    /// Begin a run: commit difficulty, reset the pole and clear enemies
    pub fn start(&mut self) {
        self.director.set_difficulty(self.settings.difficulty);
        self.director.commit_difficulty();
        self.director.reset();
        self.pole.init(&mut self.rng, &mut self.events);

        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.rendered_angle = 0.0;
        self.bot_cooldown = 0.0;
        self.touch_circles.clear();
        self.clock.reset();
        self.phase = GamePhase::Playing;
        log::info!(
            "Run started (seed {}, difficulty {})",
            self.seed,
            self.settings.difficulty.as_str()
        );
    }

    /// Flip between Playing and Paused
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Stage a difficulty from the UI; it applies at the next `start`
    pub fn select_difficulty(&mut self, level: u8) {
        self.director.set_difficulty_level(level);
        if let Some(difficulty) = super::spawn::Difficulty::from_level(level) {
            self.settings.difficulty = difficulty;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Add a touch circle at a tap position
    pub fn spawn_touch_circle(&mut self, pos: Vec2) {
        let id = self.next_circle_id;
        self.next_circle_id += 1;
        self.touch_circles.push(TouchCircle { id, pos, age: 0.0 });
    }

    /// Age touch circles and drop the expired ones
    pub fn update_touch_circles(&mut self, dt: f32) {
        for circle in &mut self.touch_circles {
            circle.age += dt.max(0.0);
        }
        self.touch_circles.retain(|c| !c.expired());
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::Difficulty;

    #[test]
    fn test_new_session_waits_in_menu() {
        let state = GameState::new(1, Tuning::default(), Settings::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.director.enemies().is_empty());
        assert!(!state.is_playing());
    }

    #[test]
    fn test_start_commits_difficulty_and_inits_pole() {
        let settings = Settings {
            difficulty: Difficulty::Easy,
            ..Default::default()
        };
        let mut state = GameState::new(1, Tuning::default(), settings);
        state.select_difficulty(2);
        assert_eq!(state.director.active_multiplier(), 1.25);

        state.start();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.director.active_multiplier(), 0.5);
        assert_eq!(state.pole.pending_force().abs(), 120.0);
        assert_eq!(state.events, vec![GameEvent::GravityScaleChanged(1.0)]);
    }

    #[test]
    fn test_toggle_pause() {
        let mut state = GameState::new(1, Tuning::default(), Settings::default());
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Menu);
        state.start();
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_touch_circles_expire() {
        let mut state = GameState::new(1, Tuning::default(), Settings::default());
        state.spawn_touch_circle(Vec2::new(1.0, 2.0));
        state.update_touch_circles(0.3);
        state.spawn_touch_circle(Vec2::new(-1.0, 2.0));
        assert_eq!(state.touch_circles.len(), 2);
        assert!(state.touch_circles[0].life() < state.touch_circles[1].life());

        state.update_touch_circles(0.3);
        assert_eq!(state.touch_circles.len(), 1);
        assert_eq!(state.touch_circles[0].id, 2);
        state.update_touch_circles(0.3);
        assert!(state.touch_circles.is_empty());
    }

    #[test]
    fn test_playfield_from_camera() {
        let field = Playfield::from_camera(5.0, 1600.0, 900.0);
        assert!((field.half_width - 5.0 * 16.0 / 9.0).abs() < 1e-4);
        assert!((field.spawn_x() - field.half_width - SPAWN_MARGIN).abs() < 1e-5);
        assert_eq!(field.floor_y, FLOOR_Y);
    }

    #[test]
    fn test_drain_events() {
        let mut state = GameState::new(1, Tuning::default(), Settings::default());
        state.start();
        assert_eq!(state.drain_events().len(), 1);
        assert!(state.events.is_empty());
    }
}
