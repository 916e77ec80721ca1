//! Error types
//!
//! Loading a map can fail for two distinct reasons: the file is not a grid of
//! the expected shape (`ParseError`), or it is a grid whose bricks cannot all be
//! destroyed (`LayoutError`). Both abort the round before it starts. Asset and
//! highscore failures belong to the host collaborators and get their own types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Malformed map geometry or alphabet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("can't load a map with zero rows/columns ({rows}x{columns})")]
    ZeroDimensions { rows: usize, columns: usize },
    #[error("invalid number of rows: expected {expected}, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} columns, expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unexpected content after row {rows}")]
    TrailingRows { rows: usize },
    #[error("invalid character {ch:?} at row {row}, column {column}")]
    InvalidChar { ch: char, row: usize, column: usize },
}

/// A well-formed map that cannot be finished
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("the map has no destructible bricks")]
    NoDestructibleBricks,
    #[error("brick at row {row}, column {column} is sealed off by walls")]
    Unreachable { row: usize, column: usize },
}

/// Any failure while loading a map for play
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("the map is unfinishable: {0}")]
    Layout(#[from] LayoutError),
}

impl MapError {
    /// True for errors in the file contents (as opposed to reading it)
    pub fn is_invalid_map(&self) -> bool {
        !matches!(self, MapError::Io { .. })
    }
}

/// Asset lookup or renderer failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("no texture registered for {0}")]
    MissingAsset(&'static str),
    #[error("renderer failure: {0}")]
    Renderer(String),
}

/// Highscore persistence failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("highscore file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid highscore entry on line {line}")]
    Malformed { line: usize },
}

/// Configuration file failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
