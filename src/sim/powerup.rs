//! Timed power-up windows
//!
//! At most one instance per kind is active. Collecting a kind that is
//! already active restarts its window instead of adding a second instance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    Shield,
    Speed,
    RapidFire,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] =
        [PowerUpKind::Shield, PowerUpKind::Speed, PowerUpKind::RapidFire];

    /// Wire tag used by the driver and presentation layer
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::Speed => "speed",
            PowerUpKind::RapidFire => "rapidfire",
        }
    }

    /// HUD display name
    pub fn name(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield",
            PowerUpKind::Speed => "Speed Boost",
            PowerUpKind::RapidFire => "Rapid Fire",
        }
    }
}

impl fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerUpKind {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shield" => Ok(PowerUpKind::Shield),
            "speed" => Ok(PowerUpKind::Speed),
            "rapidfire" | "rapid_fire" => Ok(PowerUpKind::RapidFire),
            _ => Err(SessionError::UnknownPowerUp(s.to_string())),
        }
    }
}

/// An active power-up instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub activated_at: f64,
    pub duration: f64,
}

impl ActivePowerUp {
    #[inline]
    pub fn expires_at(&self) -> f64 {
        self.activated_at + self.duration
    }

    #[inline]
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.activated_at >= self.duration
    }

    pub fn remaining(&self, now: f64) -> f64 {
        (self.expires_at() - now).max(0.0)
    }
}

/// Result of collecting a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Started,
    Refreshed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpRegistry {
    /// Active instances in activation order
    active: Vec<ActivePowerUp>,
    shield_duration: f64,
    speed_duration: f64,
    rapidfire_duration: f64,
}

impl PowerUpRegistry {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            active: Vec::with_capacity(PowerUpKind::ALL.len()),
            shield_duration: tuning.shield_duration,
            speed_duration: tuning.speed_duration,
            rapidfire_duration: tuning.rapidfire_duration,
        }
    }

    pub fn duration(&self, kind: PowerUpKind) -> f64 {
        match kind {
            PowerUpKind::Shield => self.shield_duration,
            PowerUpKind::Speed => self.speed_duration,
            PowerUpKind::RapidFire => self.rapidfire_duration,
        }
    }

    /// Start `kind`, or restart its window if it is already running.
    /// A refreshed instance keeps its place in the activation order.
    pub fn activate(&mut self, kind: PowerUpKind, now: f64) -> Activation {
        if let Some(existing) = self.active.iter_mut().find(|p| p.kind == kind) {
            existing.activated_at = now;
            return Activation::Refreshed;
        }
        self.active.push(ActivePowerUp {
            kind,
            activated_at: now,
            duration: self.duration(kind),
        });
        Activation::Started
    }

    /// Remove every instance whose window has elapsed. Returns the expired kinds
    /// in activation order.
    pub fn tick(&mut self, now: f64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        self.active.retain(|p| {
            if p.is_expired(now) {
                expired.push(p.kind);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn active_list(&self) -> &[ActivePowerUp] {
        &self.active
    }

    pub fn get(&self, kind: PowerUpKind) -> Option<&ActivePowerUp> {
        self.active.iter().find(|p| p.kind == kind)
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
