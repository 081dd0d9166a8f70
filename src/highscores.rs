//! High score leaderboard
//!
//! Kept in memory for the lifetime of a [`Session`](crate::Session), top 10.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Session tick at which the game ended
    pub tick: u64,
}

/// Scores sorted from best to worst
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Rank a score would achieve (1-indexed), None if it doesn't qualify
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a finished game. Returns the rank achieved (1-indexed) or None.
    /// Ties rank below the earlier score.
    pub fn add_score(&mut self, score: u64, level: u32, tick: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(rank - 1, HighScoreEntry { score, level, tick });
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("High score #{}: {} (level {})", rank, score, level);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score so far, 0 when empty
    pub fn best(&self) -> u64 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let mut hs = HighScores::new();
        assert!(!hs.qualifies(0));
        assert_eq!(hs.add_score(0, 1, 10), None);
        assert!(hs.is_empty());
        assert_eq!(hs.best(), 0);
    }

    #[test]
    fn test_sorted_descending() {
        let mut hs = HighScores::new();
        assert_eq!(hs.add_score(300, 2, 10), Some(1));
        assert_eq!(hs.add_score(900, 5, 20), Some(1));
        assert_eq!(hs.add_score(500, 3, 30), Some(2));
        assert_eq!(hs.add_score(500, 3, 40), Some(3));
        let scores: Vec<u64> = hs.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![900, 500, 500, 300]);
        assert_eq!(hs.entries[1].tick, 30);
        assert_eq!(hs.best(), 900);
    }

    #[test]
    fn test_full_board_keeps_top_ten() {
        let mut hs = HighScores::new();
        for i in 1..=10 {
            hs.add_score(i * 100, 1, i);
        }
        assert!(!hs.qualifies(100));
        assert_eq!(hs.potential_rank(150), Some(10));
        assert_eq!(hs.add_score(150, 1, 99), Some(10));
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(hs.entries.last().map(|e| e.score), Some(150));
    }
}
