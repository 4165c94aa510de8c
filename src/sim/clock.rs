//! Fixed-step clock
//!
//! Real frame time goes into an accumulator that is drained in whole fixed
//! steps. Whatever is left over becomes the interpolation `alpha` for the
//! render query.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedStepClock {
    pub fixed_dt: f32,
    pub max_substeps: u32,
    accumulator: f32,
    steps_this_frame: u32,
}

impl FixedStepClock {
    pub fn new(fixed_dt: f32, max_substeps: u32) -> Self {
        Self {
            fixed_dt,
            max_substeps,
            accumulator: 0.0,
            steps_this_frame: 0,
        }
    }

    /// Feed one frame of real time
    pub fn begin_frame(&mut self, real_dt: f32) {
        let mut dt = real_dt.max(0.0);
        if dt > MAX_FRAME_DT {
            log::warn!(
                "Frame took {:.1}ms, capping to {:.0}ms",
                dt * 1000.0,
                MAX_FRAME_DT * 1000.0
            );
            dt = MAX_FRAME_DT;
        }
        self.accumulator += dt;
        self.steps_this_frame = 0;
    }

    /// Consume one fixed step if enough time has built up
    pub fn should_step(&mut self) -> bool {
        if self.steps_this_frame >= self.max_substeps {
            // Drop the backlog rather than spiral
            if self.accumulator >= self.fixed_dt {
                self.accumulator %= self.fixed_dt;
            }
            return false;
        }
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }

    /// Fraction of a fixed step left over, in [0, 1)
    pub fn alpha(&self) -> f32 {
        if self.fixed_dt > 0.0 {
            (self.accumulator / self.fixed_dt).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn steps_this_frame(&self) -> u32 {
        self.steps_this_frame
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.steps_this_frame = 0;
    }
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut FixedStepClock) -> u32 {
        let mut steps = 0;
        while clock.should_step() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn test_steps_and_alpha() {
        let mut clock = FixedStepClock::new(0.1, 8);
        clock.begin_frame(0.25);
        assert_eq!(drain(&mut clock), 2);
        assert!((clock.alpha() - 0.5).abs() < 1e-4);

        clock.begin_frame(0.07);
        assert_eq!(drain(&mut clock), 1);
        assert!((clock.alpha() - 0.2).abs() < 1e-3);
    }

    #[test]
    fn test_substep_cap_drops_backlog() {
        let mut clock = FixedStepClock::new(0.01, 4);
        clock.begin_frame(0.2);
        assert_eq!(drain(&mut clock), 4);
        assert_eq!(clock.steps_this_frame(), 4);
        assert!(clock.alpha() < 1.0);

        clock.begin_frame(0.0);
        assert_eq!(drain(&mut clock), 0);
    }

    #[test]
    fn test_negative_and_huge_frames() {
        let mut clock = FixedStepClock::new(0.1, 100);
        clock.begin_frame(-1.0);
        assert_eq!(drain(&mut clock), 0);
        clock.begin_frame(10.0);
        // Capped to MAX_FRAME_DT
        assert_eq!(drain(&mut clock), 2);
    }
}
