//! Data-driven game balance
//!
//! Every balancing constant the session rules depend on. Defaults are the
//! shipped values; a JSON override only needs the fields it changes.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Health never exceeds this, whatever the override says
pub const MAX_HEALTH_CAP: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Combo ===
    /// Seconds without a hit before the combo drops to zero
    pub combo_decay_window: f64,
    /// Consecutive hits per multiplier step
    pub combo_step_hits: u32,
    /// Multiplier gained per step
    pub combo_step_bonus: f64,

    // === Rounds ===
    /// Round N promotes after `round_score_base * N` round points
    pub round_score_base: u64,
    /// Normal round length in seconds
    pub round_duration: f64,
    /// Every Nth round is a boss round
    pub boss_round_interval: u32,
    /// Boss round ends on its own after this many seconds
    pub boss_timeout: f64,
    /// Grace window between rounds
    pub transition_duration: f64,

    // === Power-ups ===
    pub shield_duration: f64,
    pub speed_duration: f64,
    pub rapidfire_duration: f64,

    // === Player ===
    pub max_health: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            combo_decay_window: 3.0,
            combo_step_hits: 10,
            combo_step_bonus: 0.5,

            round_score_base: 1000,
            round_duration: 60.0,
            boss_round_interval: 5,
            boss_timeout: 90.0,
            transition_duration: 2.0,

            shield_duration: 10.0,
            speed_duration: 8.0,
            rapidfire_duration: 12.0,

            max_health: MAX_HEALTH_CAP,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| SessionError::InvalidTuning(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        let windows = [
            ("combo_decay_window", self.combo_decay_window),
            ("round_duration", self.round_duration),
            ("boss_timeout", self.boss_timeout),
            ("shield_duration", self.shield_duration),
            ("speed_duration", self.speed_duration),
            ("rapidfire_duration", self.rapidfire_duration),
        ];
        for (name, value) in windows {
            if !value.is_finite() || value <= 0.0 {
                return Err(SessionError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        // A zero-length transition is allowed (rounds switch immediately)
        if !self.transition_duration.is_finite() || self.transition_duration < 0.0 {
            return Err(SessionError::InvalidTuning(format!(
                "transition_duration must not be negative, got {}",
                self.transition_duration
            )));
        }
        if self.boss_round_interval == 0 {
            return Err(SessionError::InvalidTuning(
                "boss_round_interval must be at least 1".into(),
            ));
        }
        if self.combo_step_hits == 0 {
            return Err(SessionError::InvalidTuning("combo_step_hits must be at least 1".into()));
        }
        if self.round_score_base == 0 {
            return Err(SessionError::InvalidTuning("round_score_base must be at least 1".into()));
        }
        if !(1..=MAX_HEALTH_CAP).contains(&self.max_health) {
            return Err(SessionError::InvalidTuning(format!(
                "max_health must be between 1 and {MAX_HEALTH_CAP}, got {}",
                self.max_health
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "boss_round_interval": 3, "shield_duration": 4.5 }"#)
            .unwrap();
        assert_eq!(tuning.boss_round_interval, 3);
        assert_eq!(tuning.shield_duration, 4.5);
        assert_eq!(tuning.round_score_base, 1000);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "boss_round_interval": 0 }"#),
            Err(SessionError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "combo_decay_window": -1.0 }"#),
            Err(SessionError::InvalidTuning(_))
        ));
        assert!(matches!(Tuning::from_json("not json"), Err(SessionError::InvalidTuning(_))));
    }

    #[test]
    fn test_max_health_is_capped() {
        assert!(matches!(
            Tuning::from_json(r#"{ "max_health": 500 }"#),
            Err(SessionError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "max_health": 0 }"#),
            Err(SessionError::InvalidTuning(_))
        ));
        assert_eq!(Tuning::from_json(r#"{ "max_health": 100 }"#).unwrap().max_health, 100);
        assert_eq!(Tuning::from_json(r#"{ "max_health": 40 }"#).unwrap().max_health, 40);
    }
}
