//! Round number and phase progression
//!
//! A normal round promotes when its score threshold is reached or its
//! duration runs out, whichever comes first. Boss rounds ignore the score
//! threshold and end when the boss is defeated or the boss timeout elapses.
//! Every promotion passes through a short `Transition` phase during which the
//! round timer is frozen.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Phase of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Normal,
    Boss,
    /// Grace window between rounds (presentation animates the round change)
    Transition,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Normal => "normal",
            RoundPhase::Boss => "boss",
            RoundPhase::Transition => "transition",
        }
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromotionReason {
    ScoreThreshold,
    TimeElapsed,
    BossDefeated,
    BossTimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// Round number increased; the new round is in `Transition`
    /// (or already settled when the grace window is zero)
    Advanced { round: u32, reason: PromotionReason },
    /// Transition finished and the round's real phase began
    Settled { round: u32, phase: RoundPhase },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundController {
    number: u32,
    phase: RoundPhase,
    /// Points scored since this round began
    round_score: u64,
    /// Seconds spent in the current round's Normal/Boss phase
    round_elapsed: f64,
    transition_remaining: f64,

    score_base: u64,
    round_duration: f64,
    boss_interval: u32,
    boss_timeout: f64,
    transition_duration: f64,
}

impl RoundController {
    pub fn new(tuning: &Tuning) -> Self {
        let mut round = Self {
            number: 1,
            phase: RoundPhase::Normal,
            round_score: 0,
            round_elapsed: 0.0,
            transition_remaining: 0.0,
            score_base: tuning.round_score_base,
            round_duration: tuning.round_duration,
            boss_interval: tuning.boss_round_interval.max(1),
            boss_timeout: tuning.boss_timeout,
            transition_duration: tuning.transition_duration,
        };
        round.reset();
        round
    }

    /// Back to round 1 with no intro transition
    pub fn reset(&mut self) {
        self.number = 1;
        self.round_score = 0;
        self.round_elapsed = 0.0;
        self.transition_remaining = 0.0;
        self.phase = self.settled_phase(1);
    }

    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[inline]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[inline]
    pub fn round_score(&self) -> u64 {
        self.round_score
    }

    #[inline]
    pub fn round_elapsed(&self) -> f64 {
        self.round_elapsed
    }

    #[inline]
    pub fn transition_remaining(&self) -> f64 {
        self.transition_remaining
    }

    pub fn is_boss_round(&self, number: u32) -> bool {
        number % self.boss_interval == 0
    }

    /// Round points needed to promote out of round `number`
    pub fn score_threshold(&self, number: u32) -> u64 {
        self.score_base.saturating_mul(number as u64)
    }

    pub fn record_score(&mut self, points: u64) {
        self.round_score = self.round_score.saturating_add(points);
    }

    /// Boss killed by the spawn subsystem. No-op outside a boss phase.
    pub fn notify_boss_defeated(&mut self) -> Vec<RoundEvent> {
        if self.phase != RoundPhase::Boss {
            return Vec::new();
        }
        self.advance(PromotionReason::BossDefeated)
    }

    /// Advance round timers by `dt` seconds
    pub fn tick(&mut self, dt: f64) -> Vec<RoundEvent> {
        match self.phase {
            RoundPhase::Transition => {
                self.transition_remaining -= dt;
                if self.transition_remaining <= 0.0 {
                    vec![self.settle()]
                } else {
                    Vec::new()
                }
            }
            RoundPhase::Normal => {
                self.round_elapsed += dt;
                if self.round_score >= self.score_threshold(self.number) {
                    self.advance(PromotionReason::ScoreThreshold)
                } else if self.round_elapsed >= self.round_duration {
                    self.advance(PromotionReason::TimeElapsed)
                } else {
                    Vec::new()
                }
            }
            RoundPhase::Boss => {
                self.round_elapsed += dt;
                if self.round_elapsed >= self.boss_timeout {
                    self.advance(PromotionReason::BossTimedOut)
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn advance(&mut self, reason: PromotionReason) -> Vec<RoundEvent> {
        self.number += 1;
        self.round_score = 0;
        self.round_elapsed = 0.0;

        let mut events = vec![RoundEvent::Advanced {
            round: self.number,
            reason,
        }];
        if self.transition_duration > 0.0 {
            self.phase = RoundPhase::Transition;
            self.transition_remaining = self.transition_duration;
        } else {
            events.push(self.settle());
        }
        events
    }

    fn settle(&mut self) -> RoundEvent {
        self.transition_remaining = 0.0;
        self.phase = self.settled_phase(self.number);
        RoundEvent::Settled {
            round: self.number,
            phase: self.phase,
        }
    }

    fn settled_phase(&self, number: u32) -> RoundPhase {
        if self.is_boss_round(number) {
            RoundPhase::Boss
        } else {
            RoundPhase::Normal
        }
    }
}
