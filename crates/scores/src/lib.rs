//! High-score persistence.
//!
//! A ranked list of finished games (`name`, `datetime`, `score`) stored as a
//! JSON array at a fixed path. Loading never fails hard: a missing or broken
//! file yields an empty list so the game always starts.
//!
//! ```
//! use chrono::Local;
//! use tui_2048_scores::{HighScoreEntry, HighScores};
//!
//! let mut scores = HighScores::new();
//! scores.record(HighScoreEntry::new("ann", Local::now(), 512));
//! scores.record(HighScoreEntry::new("bob", Local::now(), 2048));
//! assert_eq!(scores.best().unwrap().name, "bob");
//! ```

pub mod list;
pub mod store;

pub use list::{HighScoreEntry, HighScores};
pub use store::{save, try_load, ScoreError, ScoreStore};
