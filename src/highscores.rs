//! Highscore table
//!
//! Persisted as an append-only text file, one record per line:
//! `map_path <TAB> score <TAB> lives_left <TAB> player`. Reading filters by
//! map and sorts best-first.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A single highscore entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighscoreEntry {
    /// Map file the round was played on
    pub map: String,
    /// Final score
    pub score: u32,
    /// Lives left at the end of the round
    pub lives: i32,
    /// Player's name
    pub player: String,
}

/// Fields are whitespace-separated on read, so embedded whitespace is replaced
fn sanitize(field: &str) -> String {
    let cleaned: String = field
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

impl HighscoreEntry {
    pub fn new(map: impl Into<String>, score: u32, lives: i32, player: impl Into<String>) -> Self {
        Self {
            map: map.into(),
            score,
            lives,
            player: player.into(),
        }
    }

    /// One record line, including the trailing newline
    pub fn to_record(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\n",
            sanitize(&self.map),
            self.score,
            self.lives,
            sanitize(&self.player)
        )
    }

    /// Parse one record; `line_no` is 1-based and only used for errors
    pub fn parse_record(line: &str, line_no: usize) -> Result<Self, StoreError> {
        let malformed = || StoreError::Malformed { line: line_no };
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [map, score, lives, player] = fields.as_slice() else {
            return Err(malformed());
        };
        Ok(Self {
            map: (*map).to_string(),
            score: score.parse().map_err(|_| malformed())?,
            lives: lives.parse().map_err(|_| malformed())?,
            player: (*player).to_string(),
        })
    }
}

/// Best first: higher score, then more lives left
pub fn sort_entries(entries: &mut [HighscoreEntry]) {
    entries.sort_by(|a, b| b.score.cmp(&a.score).then(b.lives.cmp(&a.lives)));
}

/// Render a table as `score<TAB>lives<TAB>player` lines
pub fn format_table(entries: &[HighscoreEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{}\t{}\t{}\n", e.score, e.lives, e.player))
        .collect()
}

/// File-backed highscore store
#[derive(Debug, Clone)]
pub struct HighscoreStore {
    path: PathBuf,
}

impl HighscoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Append one record, creating the file if needed
    pub fn append(&self, entry: &HighscoreEntry) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(entry.to_record().as_bytes())
            .map_err(|e| self.io_error(e))?;
        log::info!("Highscore saved to {}", self.path.display());
        Ok(())
    }

    /// All records for `map`, best first
    ///
    /// Reading stops at the first empty line. A missing file is an empty table.
    pub fn load(&self, map: &str) -> Result<Vec<HighscoreEntry>, StoreError> {
        let map = sanitize(map);
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No highscores at {}, starting fresh", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let mut entries = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.is_empty() {
                break;
            }
            let entry = HighscoreEntry::parse_record(line, i + 1)?;
            if entry.map == map {
                entries.push(entry);
            }
        }

        sort_entries(&mut entries);
        log::info!("Loaded {} highscores for {map}", entries.len());
        Ok(entries)
    }
}
