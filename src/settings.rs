//! Player preferences
//!
//! Remembers the last start-screen selection and an optional balance
//! override. Persisted as JSON separately from high scores.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{Difficulty, Level};
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty highlighted on the start screen
    pub difficulty: Difficulty,
    /// Level highlighted on the start screen
    pub level: Level,
    /// Balance override (defaults when absent)
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            level: Level::FIRST,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse settings, falling back to defaults on malformed or invalid input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => match settings.tuning.validate() {
                Ok(()) => settings,
                Err(e) => {
                    log::warn!("Ignoring settings with invalid tuning: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Malformed settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load from disk; a missing file means defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
