//! Persisted top-5 score list. The file holds one integer per line, highest
//! first; a missing file is an empty list.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::game_trait::Score;

/// Number of scores kept in the table.
pub const MAX_HIGH_SCORES: usize = 5;

/// In-memory high-score list, always sorted descending and at most
/// [`MAX_HIGH_SCORES`] long.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScoreTable {
    scores: Vec<Score>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from arbitrary scores, keeping the best five.
    pub fn from_scores(scores: impl IntoIterator<Item = Score>) -> Self {
        let mut scores: Vec<Score> = scores.into_iter().collect();
        scores.sort_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        Self { scores }
    }

    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Insert `score` if it makes the cut. A new score ranks below existing
    /// equal scores. Returns whether it was kept.
    pub fn record(&mut self, score: Score) -> bool {
        let rank = self.scores.partition_point(|&s| s >= score);
        if rank >= MAX_HIGH_SCORES {
            return false;
        }
        self.scores.insert(rank, score);
        self.scores.truncate(MAX_HIGH_SCORES);
        true
    }

    /// Parse file contents. Blank lines are ignored; lines that are not a
    /// non-negative integer are skipped with a warning.
    pub fn parse(content: &str) -> Self {
        let scores = content.lines().enumerate().filter_map(|(idx, line)| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            match line.parse::<Score>() {
                Ok(score) => Some(score),
                Err(e) => {
                    tracing::warn!(line = idx + 1, content = line, "Skipping bad score entry: {e}");
                    None
                },
            }
        });
        Self::from_scores(scores)
    }

    /// File representation: one score per line, newline terminated.
    pub fn to_file_string(&self) -> String {
        self.scores.iter().map(|s| format!("{s}\n")).collect()
    }
}

/// Errors reading or writing the score file.
#[derive(Debug)]
pub enum ScoreFileError {
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for ScoreFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            },
            Self::Write { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            },
        }
    }
}

impl std::error::Error for ScoreFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}

/// Location of the persisted high-score list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the table. A missing file yields an empty table.
    pub fn load(&self) -> Result<HighScoreTable, ScoreFileError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(HighScoreTable::parse(&content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HighScoreTable::new()),
            Err(source) => Err(ScoreFileError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Overwrite the file with the table's contents.
    pub fn save(&self, table: &HighScoreTable) -> Result<(), ScoreFileError> {
        std::fs::write(&self.path, table.to_file_string()).map_err(|source| {
            ScoreFileError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Re-read the file, add `score`, and write the top five back. Returns
    /// the table as written.
    pub fn record(&self, score: Score) -> Result<HighScoreTable, ScoreFileError> {
        let mut table = self.load()?;
        table.record(score);
        self.save(&table)?;
        Ok(table)
    }
}
