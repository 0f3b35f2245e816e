//! File-backed high-score list.
//!
//! The whole list is rewritten on every change: serialized next to the
//! target, then renamed over it, so a crash mid-write never leaves a
//! truncated document behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::list::{HighScoreEntry, HighScores};

#[derive(thiserror::Error, Debug)]
pub enum ScoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed score file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a score document.
///
/// A missing file is an empty list, not an error.
pub fn try_load(path: &Path) -> Result<HighScores, ScoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HighScores::new()),
        Err(e) => return Err(e.into()),
    };
    let entries: Vec<HighScoreEntry> = serde_json::from_slice(&bytes)?;
    Ok(HighScores::from_entries(entries))
}

/// Write a score document, replacing any previous one.
pub fn save(path: &Path, scores: &HighScores) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_vec_pretty(scores)?;
    let tmp = tmp_path(path);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "highscores.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// High scores bound to a file
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
    scores: HighScores,
}

impl ScoreStore {
    /// Load the list at `path`
    ///
    /// Unreadable or malformed files degrade to an empty list; the file is
    /// left alone until the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = match try_load(&path) {
            Ok(scores) => {
                info!(path = %path.display(), entries = scores.len(), "high scores loaded");
                scores
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable high scores");
                HighScores::new()
            }
        };
        Self { path, scores }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    /// Add an entry and rewrite the file
    ///
    /// Returns the 0-based rank. The entry stays in memory even when the
    /// write fails.
    pub fn record(&mut self, entry: HighScoreEntry) -> Result<usize, ScoreError> {
        let rank = self.scores.record(entry);
        save(&self.path, &self.scores)?;
        Ok(rank)
    }

    /// Drop every entry and rewrite the file
    pub fn reset(&mut self) -> Result<(), ScoreError> {
        self.scores.clear();
        save(&self.path, &self.scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_empty() {
        let td = tempdir().unwrap();
        let path = td.path().join("nope.json");
        assert!(try_load(&path).unwrap().is_empty());
        assert!(ScoreStore::open(&path).scores().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn malformed_file_degrades_to_empty() {
        let td = tempdir().unwrap();
        let path = td.path().join("scores.json");
        fs::write(&path, b"{ not json").unwrap();

        assert!(matches!(try_load(&path), Err(ScoreError::Json(_))));
        let store = ScoreStore::open(&path);
        assert!(store.scores().is_empty());
    }

    #[test]
    fn record_persists_sorted() {
        let td = tempdir().unwrap();
        let path = td.path().join("nested").join("scores.json");

        let mut store = ScoreStore::open(&path);
        store.record(HighScoreEntry::new("a", Local::now(), 64)).unwrap();
        let rank = store.record(HighScoreEntry::new("b", Local::now(), 512)).unwrap();
        assert_eq!(rank, 0);

        let reloaded = ScoreStore::open(&path);
        let scores: Vec<u32> = reloaded.scores().entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![512, 64]);
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn reset_rewrites_empty_document() {
        let td = tempdir().unwrap();
        let path = td.path().join("scores.json");

        let mut store = ScoreStore::open(&path);
        store.record(HighScoreEntry::new("a", Local::now(), 32)).unwrap();
        store.reset().unwrap();

        assert!(store.scores().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
    }

    #[test]
    fn unsorted_file_is_ranked_on_load() {
        let td = tempdir().unwrap();
        let path = td.path().join("scores.json");
        fs::write(
            &path,
            r#"[
                {"name": "x", "datetime": "2024-01-01T10:00:00+00:00", "score": 8},
                {"name": "y", "datetime": "2024-01-02T10:00:00+00:00", "score": 1024}
            ]"#,
        )
        .unwrap();

        let scores = try_load(&path).unwrap();
        assert_eq!(scores.best().unwrap().name, "y");
        assert_eq!(scores.len(), 2);
    }
}
