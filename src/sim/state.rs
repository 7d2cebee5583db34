//! Session data types shared with the presentation layer
//!
//! Everything the HUD and menus read lives here: the top-level state,
//! start-screen selections, the per-frame snapshot and the game-over summary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::powerup::PowerUpKind;
use super::round::{PromotionReason, RoundPhase};
use crate::error::SessionError;
use crate::rank::Rank;

/// Top-level session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Start screen, no run in progress
    #[default]
    Idle,
    Playing,
    Paused,
    GameOver,
}

/// Difficulty picked on the start screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Chill vibes, slower enemies",
            Difficulty::Normal => "Balanced rhythm action",
            Difficulty::Hard => "Intense chaos, fast enemies",
        }
    }

    /// Enemy speed hint for the spawn subsystem (session rules ignore it)
    pub fn enemy_speed_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.75,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.4,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(SessionError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Number of selectable levels
pub const LEVEL_COUNT: u8 = 5;

/// A validated level number (1-5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const FIRST: Level = Level(1);

    pub fn new(number: u8) -> Result<Self, SessionError> {
        if (1..=LEVEL_COUNT).contains(&number) {
            Ok(Level(number))
        } else {
            Err(SessionError::InvalidLevel(number))
        }
    }

    #[inline]
    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        match self.0 {
            1 => "Neon Depths",
            2 => "Bass Canyon",
            3 => "Synth Storm",
            4 => "Beat Blitz",
            _ => "Rhythm Infinity",
        }
    }

    pub fn description(&self) -> &'static str {
        match self.0 {
            1 => "Enter the rhythm arena",
            2 => "Feel the bass drop",
            3 => "Dance with danger",
            4 => "Ultimate challenge",
            _ => "Endless mayhem",
        }
    }

    pub fn all() -> impl Iterator<Item = Level> {
        (1..=LEVEL_COUNT).map(Level)
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::FIRST
    }
}

impl TryFrom<u8> for Level {
    type Error = SessionError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Level::new(number)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

/// Power-up entry as shown on the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub name: &'static str,
    /// Seconds left in the window
    pub remaining: f64,
}

/// Immutable per-frame view of the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub score: u64,
    pub health: u32,
    pub combo: u32,
    pub multiplier: f64,
    pub level: Level,
    pub difficulty: Difficulty,
    pub active_power_ups: Vec<PowerUpView>,
    pub current_round: u32,
    pub round_phase: RoundPhase,
    pub survival_time: f64,
    pub enemies_killed: u32,
}

/// Final stats computed once when the run ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub score: u64,
    pub level: Level,
    pub difficulty: Difficulty,
    pub survival_time: f64,
    pub enemies_killed: u32,
    pub round_reached: u32,
    pub rank: Rank,
}

/// Notifications for collaborators (audio, spawner) raised during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { level: Level, difficulty: Difficulty },
    RoundAdvanced { round: u32, reason: PromotionReason },
    PhaseSettled { round: u32, phase: RoundPhase },
    PowerUpActivated { kind: PowerUpKind, refreshed: bool },
    PowerUpExpired { kind: PowerUpKind },
    ComboBroken { lost: u32 },
    Damaged { amount: u32, health: u32 },
    GameOver { summary: GameOverSummary },
}

/// HUD clock format, `m:ss`
pub fn format_clock(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    format!("{}:{:02}", total / 60, total % 60)
}

/// Game-over screen format, `Xm Ys`
pub fn format_duration(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    format!("{}m {}s", total / 60, total % 60)
}

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bounds() {
        assert!(Level::new(0).is_err());
        assert_eq!(Level::new(1).unwrap().name(), "Neon Depths");
        assert_eq!(Level::new(5).unwrap().name(), "Rhythm Infinity");
        assert_eq!(Level::new(6), Err(SessionError::InvalidLevel(6)));
        assert_eq!(Level::all().count(), 5);
    }

    #[test]
    fn test_level_serde_validates() {
        let level: Level = serde_json::from_str("3").unwrap();
        assert_eq!(level.number(), 3);
        assert!(serde_json::from_str::<Level>("9").is_err());
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(
            "nightmare".parse::<Difficulty>(),
            Err(SessionError::UnknownDifficulty("nightmare".into()))
        );
    }

    #[test]
    fn test_time_formats() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(65.9), "1:05");
        assert_eq!(format_clock(-4.0), "0:00");
        assert_eq!(format_duration(125.2), "2m 5s");
    }
}
