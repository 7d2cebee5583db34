//! Deterministic session simulation
//!
//! All gameplay rules live here. This module must stay pure and deterministic:
//! - Time only advances through `tick(dt)`
//! - No wall clock, no randomness
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod combo;
pub mod powerup;
pub mod round;
pub mod session;
pub mod state;

pub use clock::Clock;
pub use combo::{ComboTracker, combo_multiplier};
pub use powerup::{Activation, ActivePowerUp, PowerUpKind, PowerUpRegistry};
pub use round::{PromotionReason, RoundController, RoundEvent, RoundPhase};
pub use session::Session;
pub use state::{
    Difficulty, GameOverSummary, LEVEL_COUNT, Level, PowerUpView, SessionEvent, SessionSnapshot,
    SessionState, format_clock, format_duration,
};
