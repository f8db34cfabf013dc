use anyhow::{Context, Result};
use std::io::{Write, stdout};

use crate::leaderboard::{Leaderboard, ScoreEntry};

/// Print the stored scores to stdout and exit; no terminal UI involved.
pub struct LeaderboardMode {
    leaderboard: Leaderboard,
}

impl LeaderboardMode {
    pub fn new(leaderboard: Leaderboard) -> Self {
        Self { leaderboard }
    }

    pub fn run(&self) -> Result<()> {
        let mut out = stdout().lock();
        writeln!(out, "Leaderboard ({})", self.leaderboard.path().display())
            .context("Failed to write leaderboard")?;
        for row in format_rows(&self.leaderboard.top_scores()) {
            writeln!(out, "{row}").context("Failed to write leaderboard")?;
        }
        Ok(())
    }
}

/// One line per entry, ranked from 1
pub fn format_rows(entries: &[ScoreEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No scores yet. Be the first!".to_string()];
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| format!("{:>2}. {:<20}{:>6}", index + 1, entry.name, entry.score))
        .collect()
}
