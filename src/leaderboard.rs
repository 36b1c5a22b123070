//! Leaderboard of finished runs
//!
//! Persisted to a JSON file, keeps the top 10 runs by score. Runs that
//! scored nothing are never recorded.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Maximum number of runs to keep
pub const MAX_ENTRIES: usize = 10;

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    /// Fruit eaten
    pub score: u32,
    /// Seconds played
    pub elapsed_secs: u64,
    /// Unix timestamp (ms) when recorded
    pub timestamp: f64,
}

impl LeaderboardEntry {
    /// Higher score first; equal scores rank the faster run first
    fn outranks(&self, other: &LeaderboardEntry) -> bool {
        self.score > other.score
            || (self.score == other.score && self.elapsed_secs < other.elapsed_secs)
    }
}

/// Leaderboard, sorted best first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run would make the board
    pub fn qualifies(&self, score: u32, elapsed_secs: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        let candidate = LeaderboardEntry {
            username: String::new(),
            score,
            elapsed_secs,
            timestamp: 0.0,
        };
        self.entries.last().map(|e| candidate.outranks(e)).unwrap_or(true)
    }

    /// Record a run. Returns the rank achieved (1-indexed) or None if it
    /// didn't qualify.
    pub fn record(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        if !self.qualifies(entry.score, entry.elapsed_secs) {
            return None;
        }

        let pos = self
            .entries
            .iter()
            .position(|e| entry.outranks(e))
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_ENTRIES);

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from a JSON file; missing or malformed files give an empty board
    pub fn load(path: &Path) -> Self {
        let loaded = fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str::<Leaderboard>(&json).ok());

        match loaded {
            Some(mut board) => {
                board.entries.sort_by(|a, b| {
                    b.score
                        .cmp(&a.score)
                        .then(a.elapsed_secs.cmp(&b.elapsed_secs))
                });
                board.entries.truncate(MAX_ENTRIES);
                log::info!("Loaded {} leaderboard entries", board.entries.len());
                board
            }
            None => {
                log::info!("No leaderboard found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32, secs: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            username: name.to_string(),
            score,
            elapsed_secs: secs,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_zero_score_never_qualifies() {
        let mut board = Leaderboard::new();
        assert_eq!(board.record(entry("a", 0, 10)), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_ranks_by_score_then_time() {
        let mut board = Leaderboard::new();
        assert_eq!(board.record(entry("a", 3, 40)), Some(1));
        assert_eq!(board.record(entry("b", 5, 90)), Some(1));
        assert_eq!(board.record(entry("c", 3, 20)), Some(2));
        assert_eq!(board.record(entry("d", 1, 5)), Some(4));

        let names: Vec<&str> = board.entries.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a", "d"]);
        assert_eq!(board.top_score(), Some(5));
    }

    #[test]
    fn test_capped_at_max() {
        let mut board = Leaderboard::new();
        for i in 1..=(MAX_ENTRIES as u32 + 5) {
            board.record(entry("p", i, 0));
        }
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert!(!board.qualifies(1, 0));
        assert!(board.qualifies(100, 0));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        let mut board = Leaderboard::new();
        board.record(entry("a", 2, 30));
        board.record(entry("b", 4, 60));
        board.save(&path).unwrap();

        let loaded = Leaderboard::load(&path);
        assert_eq!(loaded.entries, board.entries);
    }

    #[test]
    fn test_load_sorts_and_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        let unsorted = Leaderboard {
            entries: (1..=(MAX_ENTRIES as u32 + 3))
                .map(|i| entry("p", i, 0))
                .collect(),
        };
        unsorted.save(&path).unwrap();

        let loaded = Leaderboard::load(&path);
        assert_eq!(loaded.entries.len(), MAX_ENTRIES);
        assert_eq!(loaded.top_score(), Some(MAX_ENTRIES as u32 + 3));
        assert_eq!(loaded.entries.last().map(|e| e.score), Some(4));
    }
}
