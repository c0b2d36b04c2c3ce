//! High score persistence
//!
//! The score is stored as a JSON object under a fixed key, so the file can
//! hold other entries without disturbing this one:
//!
//! ```json
//! { "snakeHighScore": 120 }
//! ```

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

use crate::game::{GameListener, GameOverReport};

/// Key the high score is stored under
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// File-backed store for a single high score
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored high score, falling back to 0 on any failure
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => score,
            Err(err) => {
                warn!(path = ?self.path, "could not read high score, starting at 0: {err:#}");
                0
            }
        }
    }

    /// Read the stored high score; a missing file counts as 0
    pub fn try_load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }

        let entries = self.read_entries()?;
        let score = match entries.get(HIGH_SCORE_KEY) {
            None => 0,
            Some(value) => value
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .with_context(|| format!("{} is not a valid score: {}", HIGH_SCORE_KEY, value))?,
        };

        Ok(score)
    }

    /// Write the high score, keeping any other entries in the file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        // A corrupt file is overwritten rather than blocking the new record
        let mut entries = if self.path.exists() {
            self.read_entries().unwrap_or_default()
        } else {
            Map::new()
        };
        entries.insert(HIGH_SCORE_KEY.to_string(), Value::from(score));

        let json = serde_json::to_string_pretty(&Value::Object(entries))
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        debug!(score, path = ?self.path, "high score saved");
        Ok(())
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let value: Value = serde_json::from_str(&json).context("Failed to parse high score file")?;

        match value {
            Value::Object(map) => Ok(map),
            other => anyhow::bail!("expected a JSON object, found {}", other),
        }
    }
}

/// Listener that persists a new record whenever a game beats the high score
#[derive(Debug, Clone)]
pub struct HighScoreRecorder {
    store: HighScoreStore,
}

impl HighScoreRecorder {
    pub fn new(store: HighScoreStore) -> Self {
        Self { store }
    }
}

impl GameListener for HighScoreRecorder {
    fn on_game_over(&mut self, report: &GameOverReport) {
        if !report.is_new_high_score() {
            return;
        }

        if let Err(err) = self.store.save(report.final_score) {
            error!("Failed to persist high score: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameOverCause;
    use tempfile::TempDir;

    fn report(final_score: u32, previous_high_score: u32) -> GameOverReport {
        GameOverReport {
            final_score,
            cause: GameOverCause::SelfCollision,
            previous_high_score,
        }
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("scores.json"));

        assert_eq!(store.try_load().unwrap(), 0);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("nested/dir/scores.json"));

        store.save(240).unwrap();
        assert_eq!(store.load(), 240);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains(HIGH_SCORE_KEY));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json at all").unwrap();
        let store = HighScoreStore::new(&path);

        assert!(store.try_load().is_err());
        assert_eq!(store.load(), 0);

        // Saving repairs the file
        store.save(30).unwrap();
        assert_eq!(store.load(), 30);
    }

    #[test]
    fn test_negative_score_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{ "snakeHighScore": -5 }"#).unwrap();

        assert_eq!(HighScoreStore::new(&path).load(), 0);
    }

    #[test]
    fn test_other_entries_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{ "snakeSettings": { "theme": "ocean" } }"#).unwrap();
        let store = HighScoreStore::new(&path);

        assert_eq!(store.load(), 0);
        store.save(50).unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["snakeSettings"]["theme"], "ocean");
        assert_eq!(raw[HIGH_SCORE_KEY], 50);
    }

    #[test]
    fn test_recorder_writes_only_new_records() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("scores.json"));
        let mut recorder = HighScoreRecorder::new(store.clone());

        recorder.on_game_over(&report(40, 60));
        assert!(!store.path().exists());

        recorder.on_game_over(&report(80, 60));
        assert_eq!(store.load(), 80);
    }
}
