//! Error types for session operations
//!
//! None of these are fatal. A method that returns an error leaves the
//! session exactly as it was.

use thiserror::Error;

use crate::sim::SessionState;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// Operation not allowed from the current state
    #[error("cannot {op} while {state:?}")]
    InvalidTransition { op: &'static str, state: SessionState },
    #[error("level {0} does not exist (expected 1-5)")]
    InvalidLevel(u8),
    #[error("unknown power-up type: {0:?}")]
    UnknownPowerUp(String),
    #[error("unknown difficulty: {0:?}")]
    UnknownDifficulty(String),
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

impl SessionError {
    pub(crate) fn transition(op: &'static str, state: SessionState) -> Self {
        Self::InvalidTransition { op, state }
    }
}
