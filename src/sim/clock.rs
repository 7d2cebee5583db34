//! Monotonic simulation clock
//!
//! Time only moves when the owner calls [`Clock::advance`]. Nothing here
//! reads wall time, so a paused session simply stops advancing its clocks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    now: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds elapsed since the clock was created or reset
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance by `dt` seconds. Malformed deltas (negative, NaN, inf) count as zero.
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.now += sanitize_dt(dt);
        self.now
    }

    pub fn reset(&mut self) {
        self.now = 0.0;
    }
}

/// Clamp a driver-supplied delta to a usable non-negative value
#[inline]
pub fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates() {
        let mut clock = Clock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.now(), 0.75);
    }

    #[test]
    fn test_malformed_delta_is_zero() {
        let mut clock = Clock::new();
        clock.advance(1.0);
        clock.advance(-3.0);
        clock.advance(f64::NAN);
        clock.advance(f64::INFINITY);
        assert_eq!(clock.now(), 1.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = Clock::new();
        clock.advance(10.0);
        clock.reset();
        assert_eq!(clock.now(), 0.0);
    }
}
