//! Rhythm FPS - session core for a rhythm arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic session state machine (rounds, combo, power-ups)
//! - `rank`: End-of-run rank classification
//! - `tuning`: Data-driven game balance
//! - `settings`: Persisted start-screen selection
//! - `highscores`: Top-10 leaderboard
//! - `driver`: Fixed timestep frame driver
//! - `autoplay`: Seeded bot for demos and soak tests

pub mod autoplay;
pub mod driver;
pub mod error;
pub mod highscores;
pub mod rank;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::SessionError;
pub use highscores::HighScores;
pub use rank::{Rank, rank};
pub use settings::Settings;
pub use sim::{Difficulty, Session, SessionSnapshot, SessionState};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will account for (tab switches, breakpoints)
    pub const MAX_FRAME_DT: f64 = 0.1;
}
