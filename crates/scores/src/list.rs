//! Ranked list of finished games.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One finished game
///
/// Serialized as `{"name": ..., "datetime": <RFC 3339>, "score": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub datetime: DateTime<Local>,
    pub score: u32,
}

impl HighScoreEntry {
    pub fn new(name: impl Into<String>, datetime: DateTime<Local>, score: u32) -> Self {
        Self {
            name: name.into(),
            datetime,
            score,
        }
    }
}

/// Entries sorted by score, highest first
///
/// Equal scores keep insertion order, so an older entry outranks a newer one
/// with the same score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries in any order
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        // Stable sort keeps file order among ties.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    /// Insert keeping the list sorted; returns the 0-based rank
    pub fn record(&mut self, entry: HighScoreEntry) -> usize {
        let rank = self.rank_of(entry.score);
        self.entries.insert(rank, entry);
        rank
    }

    /// Rank a new entry with `score` would get (0-based)
    pub fn rank_of(&self, score: u32) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }

    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    pub fn top(&self, n: usize) -> &[HighScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
