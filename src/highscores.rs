//! High score persistence.
//!
//! A single integer stored as a small JSON file. Reads fall back to 0 on any
//! problem and writes fail silently (logged at warn): persistence must never
//! interrupt gameplay.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// File-backed store for the best score across sessions.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location used by the binary.
    pub fn default_path() -> PathBuf {
        PathBuf::from("data/highscore.json")
    }

    /// Load the persisted high score; 0 if the file is missing, unreadable,
    /// or malformed.
    pub fn load(&self) -> u32 {
        let Ok(text) = fs::read_to_string(&self.path) else {
            return 0;
        };
        match serde_json::from_str::<HighScoreFile>(&text) {
            Ok(file) => file.high_score,
            Err(err) => {
                log::warn!("high score file {} is malformed: {err}", self.path.display());
                0
            }
        }
    }

    /// Persist a new high score, creating the parent directory if needed.
    /// The caller only invokes this for a new maximum; failures are logged
    /// and otherwise ignored.
    pub fn save(&self, score: u32) {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                let _ = fs::create_dir_all(dir);
            }
        }
        let record = HighScoreFile { high_score: score };
        let json = match serde_json::to_string_pretty(&record) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("cannot encode high score: {err}");
                return;
            }
        };
        match fs::write(&self.path, json) {
            Ok(()) => log::info!("high score {score} saved to {}", self.path.display()),
            Err(err) => log::warn!("cannot save high score to {}: {err}", self.path.display()),
        }
    }
}
