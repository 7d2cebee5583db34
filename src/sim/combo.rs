//! Consecutive-hit streak with timeout decay

use serde::{Deserialize, Serialize};

/// Score multiplier for a streak of `count` hits.
///
/// Every `step_hits` consecutive hits add `step_bonus`: with the default
/// balance that is 1.0x for 0-9 hits, 1.5x for 10-19, 2.0x for 20-29 and so on.
pub fn combo_multiplier(count: u32, step_hits: u32, step_bonus: f64) -> f64 {
    let steps = count / step_hits.max(1);
    1.0 + steps as f64 * step_bonus
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboTracker {
    count: u32,
    /// Clock time of the most recent hit
    last_hit_at: f64,
    decay_window: f64,
}

impl ComboTracker {
    pub fn new(decay_window: f64) -> Self {
        Self {
            count: 0,
            last_hit_at: 0.0,
            decay_window,
        }
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn last_hit_at(&self) -> f64 {
        self.last_hit_at
    }

    pub fn register_hit(&mut self, now: f64) -> u32 {
        self.count = self.count.saturating_add(1);
        self.last_hit_at = now;
        self.count
    }

    /// Drop the streak. Returns the count that was lost.
    pub fn register_miss(&mut self) -> u32 {
        std::mem::take(&mut self.count)
    }

    pub fn register_damage(&mut self) -> u32 {
        self.register_miss()
    }

    /// Expire the streak once the decay window has elapsed without a hit.
    /// Returns the lost count when the streak decays on this call.
    pub fn tick(&mut self, now: f64) -> Option<u32> {
        if self.count > 0 && now - self.last_hit_at >= self.decay_window {
            Some(self.register_miss())
        } else {
            None
        }
    }
}
