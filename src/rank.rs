//! End-of-run rank classification

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Rookie,
    Sharpshooter,
    Expert,
    Master,
    Legend,
}

impl Rank {
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Rookie => "Rookie",
            Rank::Sharpshooter => "Sharpshooter",
            Rank::Expert => "Expert",
            Rank::Master => "Master",
            Rank::Legend => "Legend",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rank for a final score. Each bound is exclusive on the upper side.
pub fn rank(score: u64) -> Rank {
    match score {
        0..1000 => Rank::Rookie,
        1000..3000 => Rank::Sharpshooter,
        3000..5000 => Rank::Expert,
        5000..10000 => Rank::Master,
        _ => Rank::Legend,
    }
}
