//! Map loading and validation
//!
//! A map is a grid of single-character cells: `0` is empty, `1`-`9` is a brick
//! that takes that many hits, `#` is an indestructible wall. A map is only
//! accepted if every brick can be reached from outside the grid without
//! crossing a wall, checked once at load time by flood fill.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::consts::WALL_GLYPH;
use crate::error::{LayoutError, MapError, ParseError};

/// Cell code for an indestructible wall
pub const WALL: i32 = -1;
/// Cell code for an empty cell
pub const EMPTY: i32 = 0;

/// Marker for flood-filled cells in the padded scratch grid
const VISITED: i32 = -2;

/// A validated brick layout
///
/// Only built by `parse`/`load`, so every map in play has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Map {
    rows: usize,
    columns: usize,
    cells: Vec<i32>,
}

impl Map {
    /// Read, parse and validate a map file
    pub fn load(path: impl AsRef<Path>, rows: usize, columns: usize) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::parse(&text, rows, columns)?;
        log::info!(
            "Loaded map {} ({}x{}, {} destructible bricks)",
            path.display(),
            rows,
            columns,
            map.destructible_count()
        );
        Ok(map)
    }

    /// Parse and validate map text of exactly `rows` lines of `columns` cells
    pub fn parse(text: &str, rows: usize, columns: usize) -> Result<Self, MapError> {
        let cells = parse_grid(text, rows, columns)?;
        validate_layout(&cells, rows, columns)?;
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// (rows, columns)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Cell code at (row, column), or None outside the grid
    pub fn cell(&self, row: usize, column: usize) -> Option<i32> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    /// Nonzero cells in row-major order as (row, column, code)
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, code)| **code != EMPTY)
            .map(|(i, code)| (i / self.columns, i % self.columns, *code))
    }

    pub fn destructible_count(&self) -> usize {
        self.cells.iter().filter(|&&code| code > 0).count()
    }
}

fn parse_cell(ch: char, row: usize, column: usize) -> Result<i32, ParseError> {
    if let Some(digit) = ch.to_digit(10) {
        return Ok(digit as i32);
    }
    if ch == WALL_GLYPH {
        return Ok(WALL);
    }
    Err(ParseError::InvalidChar { ch, row, column })
}

/// Parse the grid shape and alphabet
fn parse_grid(text: &str, rows: usize, columns: usize) -> Result<Vec<i32>, ParseError> {
    if rows == 0 || columns == 0 {
        return Err(ParseError::ZeroDimensions { rows, columns });
    }

    let mut lines = text.lines();
    let mut cells = Vec::with_capacity(rows * columns);

    for row in 0..rows {
        let Some(line) = lines.next() else {
            return Err(ParseError::RowCount {
                expected: rows,
                found: row,
            });
        };
        let found = line.chars().count();
        if found != columns {
            return Err(ParseError::ColumnCount {
                row,
                expected: columns,
                found,
            });
        }
        for (column, ch) in line.chars().enumerate() {
            cells.push(parse_cell(ch, row, column)?);
        }
    }

    if lines.any(|line| !line.trim().is_empty()) {
        return Err(ParseError::TrailingRows { rows });
    }

    Ok(cells)
}

/// Prove every destructible cell is reachable from outside the grid
///
/// The grid is embedded in a one-cell ring of empty padding so the flood can
/// start at the corner and wrap around every edge. Walls and visited cells
/// block the flood; bricks and empty cells do not.
fn validate_layout(cells: &[i32], rows: usize, columns: usize) -> Result<(), LayoutError> {
    if !cells.iter().any(|&code| code > 0) {
        return Err(LayoutError::NoDestructibleBricks);
    }

    let width = columns + 2;
    let height = rows + 2;
    let mut grid = vec![EMPTY; width * height];
    for row in 0..rows {
        let src = &cells[row * columns..(row + 1) * columns];
        let start = (row + 1) * width + 1;
        grid[start..start + columns].copy_from_slice(src);
    }

    let mut stack = vec![(0usize, 0usize)];
    while let Some((r, c)) = stack.pop() {
        let idx = r * width + c;
        if grid[idx] < 0 {
            continue;
        }
        grid[idx] = VISITED;

        if c + 1 < width {
            stack.push((r, c + 1));
        }
        if r + 1 < height {
            stack.push((r + 1, c));
        }
        if c > 0 {
            stack.push((r, c - 1));
        }
        if r > 0 {
            stack.push((r - 1, c));
        }
    }

    match grid.iter().position(|&code| code > 0) {
        Some(idx) => Err(LayoutError::Unreachable {
            row: idx / width - 1,
            column: idx % width - 1,
        }),
        None => Ok(()),
    }
}
