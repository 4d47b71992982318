//! Durable local high-score storage
//!
//! One JSON document under a fixed namespace. The file may be edited or
//! clobbered by other processes between runs; reads treat whatever is there
//! as the truth (last write wins) and corrupt content degrades to an empty
//! leaderboard instead of an error.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::highscores::HighScores;

/// Fixed namespace for durable local state
pub const STORE_NAMESPACE: &str = "ember_dash";

/// Failures writing the score document
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store io: {0}")]
    Io(#[from] io::Error),
    #[error("score store encoding: {0}")]
    Encode(#[from] serde_json::Error),
}

/// File-backed store for the high-score leaderboard
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    /// Store rooted in the given directory, named by [`STORE_NAMESPACE`]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORE_NAMESPACE}_scores.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the leaderboard; missing or unreadable files yield an empty one.
    pub fn load(&self) -> HighScores {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(err) => {
                    log::warn!("corrupt score file {}: {err}", self.path.display());
                    HighScores::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("no high scores found, starting fresh");
                HighScores::new()
            }
            Err(err) => {
                log::warn!("cannot read score file {}: {err}", self.path.display());
                HighScores::new()
            }
        }
    }

    /// Overwrite the document with the given leaderboard.
    pub fn save(&self, scores: &HighScores) -> Result<(), StoreError> {
        let json = serde_json::to_string(scores)?;
        std::fs::write(&self.path, json)?;
        log::info!("high scores saved ({} entries)", scores.entries.len());
        Ok(())
    }
}
