//! Enemy spawning and the active enemy set
//!
//! The director counts down a spawn interval scaled by the difficulty
//! multiplier and owns every enemy until it leaves the playfield or sticks
//! to the pole. Difficulty changes are staged and only take effect on
//! `commit_difficulty`, so a mid-run change never jolts the current cadence.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::circle_pole_collision;
use super::enemy::{Contact, Enemy, EnemyKind, Side};
use super::pole::Pole;
use super::state::{Feedback, GameEvent, GamePhase, Playfield};
use crate::tuning::{EnemyTuning, SpawnTuning};

/// Spawn speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Multiplier on the spawn interval (lower spawns faster)
    pub fn multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.25,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 0.5,
        }
    }

    /// Map a UI level (0 = Easy, 1 = Medium, 2 = Hard)
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Difficulty::Easy),
            1 => Some(Difficulty::Medium),
            2 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Spawns, moves and retires enemies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnDirector {
    /// Seconds accumulated toward the next spawn
    timer: f32,
    base_interval: f32,
    active_multiplier: f32,
    pending_multiplier: f32,
    /// Active enemies (sorted by id)
    enemies: Vec<Enemy>,
    next_id: u32,
    tuning: SpawnTuning,
    enemy_tuning: EnemyTuning,
}

impl SpawnDirector {
    pub fn new(tuning: SpawnTuning, enemy_tuning: EnemyTuning) -> Self {
        Self {
            timer: 0.0,
            base_interval: tuning.base_interval,
            active_multiplier: Difficulty::Medium.multiplier(),
            pending_multiplier: Difficulty::Medium.multiplier(),
            enemies: Vec::new(),
            next_id: 1,
            tuning,
            enemy_tuning,
        }
    }

    /// Stage a difficulty; it applies at the next commit
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        log::debug!("Difficulty staged: {}", difficulty.as_str());
        self.pending_multiplier = difficulty.multiplier();
    }

    /// Stage a difficulty by UI level. Unknown levels are ignored.
    pub fn set_difficulty_level(&mut self, level: u8) {
        match Difficulty::from_level(level) {
            Some(difficulty) => self.set_difficulty(difficulty),
            None => log::warn!("Ignoring unknown difficulty level {}", level),
        }
    }

    /// Apply the staged difficulty
    pub fn commit_difficulty(&mut self) {
        self.active_multiplier = self.pending_multiplier;
        log::info!("Spawn multiplier set to {}", self.active_multiplier);
    }

    /// Clear enemies and the spawn countdown for a new run
    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.enemies.clear();
    }

    /// Seconds between spawns at the active multiplier
    pub fn spawn_interval(&self) -> f32 {
        self.base_interval * self.active_multiplier
    }

    /// Advance the spawn countdown. Returns the id of the enemy spawned
    /// this step, if any.
    pub fn update(
        &mut self,
        dt: f32,
        phase: GamePhase,
        playfield: &Playfield,
        rng: &mut impl Rng,
        fx: &mut dyn Feedback,
    ) -> Option<u32> {
        match phase {
            GamePhase::Playing => {
                self.timer += dt.max(0.0);
                let interval = self.spawn_interval();
                if self.timer >= interval {
                    self.timer -= interval;
                    Some(self.spawn(playfield, rng, fx))
                } else {
                    None
                }
            }
            GamePhase::GameOver => {
                self.clear_enemies();
                None
            }
            GamePhase::Menu | GamePhase::Paused => None,
        }
    }

    fn spawn(&mut self, playfield: &Playfield, rng: &mut impl Rng, fx: &mut dyn Feedback) -> u32 {
        let side = if rng.random_range(0..2) == 0 {
            Side::Left
        } else {
            Side::Right
        };
        let cue = rng.random_range(0..self.tuning.entry_cues.max(1));
        let kind = if rng.random_range(0..self.tuning.stick_odds.max(1)) == 0 {
            EnemyKind::Stick
        } else {
            EnemyKind::Bounce
        };

        let id = self.next_id;
        self.next_id += 1;
        let enemy = Enemy::spawn(id, side, kind, playfield.spawn_x(), &self.enemy_tuning, rng);
        log::debug!(
            "Spawned {:?} enemy {} on {:?} with velocity ({:.1}, {:.1})",
            kind,
            id,
            side,
            enemy.vel.x,
            enemy.vel.y
        );
        self.enemies.push(enemy);
        fx.emit(GameEvent::EnemyEntered { id, cue });
        id
    }

    /// Move every enemy one fixed step
    pub fn step_enemies(&mut self, dt: f32) {
        for enemy in &mut self.enemies {
            enemy.step_fixed(dt);
        }
    }

    /// Resolve enemy contacts against the pole's fixed-step pose. Stuck
    /// enemies leave the active set. Returns the number of contacts.
    pub fn resolve_collisions(&mut self, pole: &mut Pole, fx: &mut dyn Feedback) -> usize {
        let angle = pole.target_rotation();
        let mut contacts = 0;

        self.enemies.retain_mut(|enemy| {
            if enemy.consumed {
                return true;
            }
            let hit = circle_pole_collision(enemy.pos, enemy.radius, pole.tuning(), angle);
            let Some(contact) = enemy.resolve_collision(&hit) else {
                return true;
            };
            contacts += 1;
            pole.collide(contact.impact(), fx);
            matches!(contact, Contact::Bounced(_))
        });
        contacts
    }

    /// Destroy enemies that have left the playfield. Returns how many.
    pub fn cull(&mut self, playfield: &Playfield, fx: &mut dyn Feedback) -> usize {
        let before = self.enemies.len();
        let half_width = playfield.spawn_x();
        self.enemies.retain(|enemy| {
            if !enemy.is_out_of_bounds(half_width, playfield.floor_y) {
                return true;
            }
            if enemy.consumed {
                fx.emit(GameEvent::EnemySwipedOff { id: enemy.id });
            }
            false
        });
        before - self.enemies.len()
    }

    /// Destroy every active enemy
    pub fn clear_enemies(&mut self) {
        if !self.enemies.is_empty() {
            log::info!("Clearing {} enemies", self.enemies.len());
            self.enemies.clear();
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn active_multiplier(&self) -> f32 {
        self.active_multiplier
    }

    pub fn pending_multiplier(&self) -> f32 {
        self.pending_multiplier
    }
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self::new(SpawnTuning::default(), EnemyTuning::default())
    }
}
