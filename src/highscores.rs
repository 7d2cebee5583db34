//! High score leaderboard system
//!
//! Tracks the top 10 finished runs, persisted as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::rank::Rank;
use crate::sim::{Difficulty, GameOverSummary, Level};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Round reached
    pub round: u32,
    pub level: Level,
    pub difficulty: Difficulty,
    pub survival_time: f64,
    pub rank: Rank,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Whether a finished run with `score` earns a place on the table.
    /// Scoreless runs never do; a full table needs a strictly better run.
    pub fn qualifies(&self, score: u64) -> bool {
        match self.entries.get(MAX_HIGH_SCORES - 1) {
            _ if score == 0 => false,
            Some(weakest) => score > weakest.score,
            None => true,
        }
    }

    /// Table position (1-indexed) a run with `score` would take
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.qualifies(score).then(|| self.insert_index(score) + 1)
    }

    /// First slot holding a lower score; equal scores keep the older run ahead
    fn insert_index(&self, score: u64) -> usize {
        self.entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
    }

    /// Record a finished run (if it qualifies).
    /// Returns the position achieved (1-indexed) or None if it didn't qualify
    pub fn add_summary(&mut self, summary: &GameOverSummary, timestamp: f64) -> Option<usize> {
        if !self.qualifies(summary.score) {
            return None;
        }

        let entry = HighScoreEntry {
            score: summary.score,
            round: summary.round_reached,
            level: summary.level,
            difficulty: summary.difficulty,
            survival_time: summary.survival_time,
            rank: summary.rank,
            timestamp,
        };

        let index = self.insert_index(summary.score);
        self.entries.insert(index, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        let place = index + 1;
        log::info!("New high score #{}: {}", place, summary.score);
        Some(place)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<HighScores>(json) {
            Ok(scores) => scores,
            Err(e) => {
                log::warn!("Corrupt high score table, starting fresh: {}", e);
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let scores = Self::from_json(&json);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(_) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
