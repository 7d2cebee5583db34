//! Fixed timestep frame driver
//!
//! Converts variable render-frame deltas into whole simulation ticks.
//! Ticks only run while the session is `Playing`; any time that piles up
//! while paused or in a menu is discarded so resuming never catches up.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{Session, SessionState};

#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    sim_dt: f64,
    max_substeps: u32,
    max_frame_dt: f64,
    accumulator: f64,
}

impl Default for FixedStepDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedStepDriver {
    pub fn new() -> Self {
        Self::with_step(SIM_DT, MAX_SUBSTEPS, MAX_FRAME_DT)
    }

    pub fn with_step(sim_dt: f64, max_substeps: u32, max_frame_dt: f64) -> Self {
        Self {
            sim_dt,
            max_substeps,
            max_frame_dt,
            accumulator: 0.0,
        }
    }

    #[inline]
    pub fn sim_dt(&self) -> f64 {
        self.sim_dt
    }

    /// Unsimulated time carried into the next frame
    #[inline]
    pub fn pending(&self) -> f64 {
        self.accumulator
    }

    /// Feed one render frame. Returns how many ticks ran.
    pub fn advance(&mut self, session: &mut Session, frame_dt: f64) -> u32 {
        if session.state() != SessionState::Playing {
            self.accumulator = 0.0;
            return 0;
        }

        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.max_frame_dt)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= self.sim_dt && substeps < self.max_substeps {
            if session.tick(self.sim_dt).is_err() {
                self.accumulator = 0.0;
                break;
            }
            self.accumulator -= self.sim_dt;
            substeps += 1;
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Difficulty;

    fn playing() -> Session {
        let mut session = Session::new();
        session.start(1, Difficulty::Normal).unwrap();
        session
    }

    #[test]
    fn test_whole_ticks_and_carry() {
        let mut session = playing();
        let mut driver = FixedStepDriver::with_step(0.25, 8, 10.0);

        assert_eq!(driver.advance(&mut session, 0.625), 2);
        assert_eq!(driver.pending(), 0.125);
        assert_eq!(driver.advance(&mut session, 0.125), 1);
        assert_eq!(session.survival_time(), 0.75);
    }

    #[test]
    fn test_frame_clamp_and_substep_cap() {
        let mut session = playing();
        let mut driver = FixedStepDriver::with_step(0.25, 2, 1.0);

        // 5s frame is clamped to 1s, then capped at 2 ticks
        assert_eq!(driver.advance(&mut session, 5.0), 2);
        assert_eq!(session.survival_time(), 0.5);
    }

    #[test]
    fn test_paused_discards_time() {
        let mut session = playing();
        let mut driver = FixedStepDriver::with_step(0.25, 8, 10.0);
        driver.advance(&mut session, 0.125);

        session.pause().unwrap();
        assert_eq!(driver.advance(&mut session, 3.0), 0);
        assert_eq!(driver.pending(), 0.0);

        session.resume().unwrap();
        assert_eq!(driver.advance(&mut session, 0.125), 0);
        assert_eq!(session.survival_time(), 0.0);
    }

    #[test]
    fn test_default_step() {
        let driver = FixedStepDriver::new();
        assert_eq!(driver.sim_dt(), SIM_DT);
    }
}
