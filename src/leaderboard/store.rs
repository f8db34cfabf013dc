use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::error::LeaderboardError;
use crate::game::ScoreSubmission;

/// Entries kept after each insert
pub const MAX_ENTRIES: usize = 10;
/// Longer names are cut to this many characters
pub const MAX_NAME_CHARS: usize = 20;

/// One stored leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    /// Unix milliseconds when the score was recorded
    pub timestamp: u64,
}

/// Top scores persisted as a JSON array.
///
/// Safe to share between threads; every insert rewrites the file.
pub struct Leaderboard {
    path: PathBuf,
    entries: Mutex<Vec<ScoreEntry>>,
}

impl Leaderboard {
    /// Load the leaderboard at `path`.
    ///
    /// A missing file starts empty. An unreadable or corrupt file is logged
    /// and also starts empty, so the game stays playable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("failed to load leaderboard: {e}");
                Vec::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current entries, best first
    pub fn top_scores(&self) -> Vec<ScoreEntry> {
        self.lock().clone()
    }

    /// Record a finished game and persist the list
    pub fn add_score(&self, submission: &ScoreSubmission) -> Result<ScoreEntry, LeaderboardError> {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.add_score_at(submission, now_ms)
    }

    fn add_score_at(
        &self,
        submission: &ScoreSubmission,
        timestamp: u64,
    ) -> Result<ScoreEntry, LeaderboardError> {
        let name = submission.name.trim();
        if name.is_empty() {
            return Err(LeaderboardError::NameRequired);
        }

        let entry = ScoreEntry {
            name: name.chars().take(MAX_NAME_CHARS).collect(),
            score: submission.score,
            timestamp,
        };

        let mut entries = self.lock();
        entries.push(entry.clone());
        // Equal scores keep the earlier one on top
        entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.timestamp.cmp(&b.timestamp))
        });
        entries.truncate(MAX_ENTRIES);
        self.save(&entries)?;

        Ok(entry)
    }

    fn save(&self, entries: &[ScoreEntry]) -> Result<(), LeaderboardError> {
        let json = serde_json::to_string_pretty(entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LeaderboardError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, json).map_err(|source| LeaderboardError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ScoreEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load_entries(path: &Path) -> Result<Vec<ScoreEntry>, LeaderboardError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(LeaderboardError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    Ok(serde_json::from_str(&raw)?)
}
