#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Life Maze solvers.
//!
//! This crate defines the vocabulary every other crate speaks: grid cell
//! markers and their digit encoding, positions and the four orthogonal
//! movement directions, the immutable [`GridGeneration`] matrix the
//! automaton evolves turn by turn, and the shared [`cost`] model both the
//! offline planner and the online navigator score candidate moves with.

pub mod cost;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker stored in a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Traversable cell holding no obstacle.
    Empty,
    /// Live cell of the automaton; fatal to stand on.
    Obstacle,
    /// Marker recorded at the agent's starting coordinate.
    Start,
    /// Marker recorded at the agent's destination coordinate.
    Goal,
}

impl Cell {
    /// Reports whether the cell counts as alive for the automaton rule.
    #[must_use]
    pub const fn is_obstacle(self) -> bool {
        matches!(self, Self::Obstacle)
    }

    /// Parses the single-digit board encoding (`0`, `1`, `3`, `4`).
    #[must_use]
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Self::Empty),
            '1' => Some(Self::Obstacle),
            '3' => Some(Self::Start),
            '4' => Some(Self::Goal),
            _ => None,
        }
    }

    /// Digit used by the flat board encoding.
    #[must_use]
    pub const fn to_digit(self) -> char {
        match self {
            Self::Empty => '0',
            Self::Obstacle => '1',
            Self::Start => '3',
            Self::Goal => '4',
        }
    }
}

/// Cardinal movement directions available to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Fixed evaluation order used when enumerating candidate moves.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
}

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u32,
    col: u32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Zero-based row index of the position.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the position.
    #[must_use]
    pub const fn col(&self) -> u32 {
        self.col
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Position one step away in `direction`, or `None` when the step would
    /// leave the grid through the zero edge. Upper bounds are checked by
    /// callers against the grid dimensions.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Self::new(row, self.col)),
            Direction::Down => self.row.checked_add(1).map(|row| Self::new(row, self.col)),
            Direction::Left => self.col.checked_sub(1).map(|col| Self::new(self.row, col)),
            Direction::Right => self.col.checked_add(1).map(|col| Self::new(self.row, col)),
        }
    }
}

/// Direction that moves `from` onto `to`, or `None` when the two positions
/// are not orthogonally adjacent.
#[must_use]
pub fn direction_between(from: Position, to: Position) -> Option<Direction> {
    let row_diff = from.row().abs_diff(to.row());
    let col_diff = from.col().abs_diff(to.col());
    if row_diff + col_diff != 1 {
        return None;
    }

    if row_diff == 1 {
        if to.row() > from.row() {
            Some(Direction::Down)
        } else {
            Some(Direction::Up)
        }
    } else if to.col() > from.col() {
        Some(Direction::Right)
    } else {
        Some(Direction::Left)
    }
}

/// Reasons a grid cannot be constructed from the provided parts.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// One of the grid dimensions is zero.
    #[error("grid dimensions must be non-zero, got {rows}x{cols}")]
    ZeroDimension {
        /// Requested number of rows.
        rows: u32,
        /// Requested number of columns.
        cols: u32,
    },
    /// The cell buffer does not match the declared dimensions.
    #[error("expected {expected} cells for a {rows}x{cols} grid, got {actual}")]
    CellCountMismatch {
        /// Requested number of rows.
        rows: u32,
        /// Requested number of columns.
        cols: u32,
        /// Cell count implied by the dimensions.
        expected: usize,
        /// Cell count actually provided.
        actual: usize,
    },
}

/// Immutable rectangular matrix of cell markers identified by its depth in
/// the automaton ladder. Dimensions are constant across all generations of
/// one run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridGeneration {
    rows: u32,
    cols: u32,
    cells: Vec<Cell>,
}

impl GridGeneration {
    /// Creates a grid with every cell set to [`Cell::Empty`].
    pub fn filled(rows: u32, cols: u32) -> Result<Self, GridError> {
        let cell_count = cell_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; cell_count],
        })
    }

    /// Creates a grid from a row-major cell buffer.
    pub fn from_cells(rows: u32, cols: u32, cells: Vec<Cell>) -> Result<Self, GridError> {
        let expected = cell_count(rows, cols)?;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                rows,
                cols,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Reports whether the position lies within the grid bounds.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.row() < self.rows && position.col() < self.cols
    }

    /// Marker stored at the position, if it lies within the grid.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<Cell> {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the position holds a live obstacle. Out-of-bounds
    /// positions report `false`; bounds are rejected separately.
    #[must_use]
    pub fn is_obstacle(&self, position: Position) -> bool {
        self.get(position).map_or(false, Cell::is_obstacle)
    }

    /// Row-major view of the underlying cell buffer.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let row = usize::try_from(position.row()).ok()?;
        let col = usize::try_from(position.col()).ok()?;
        let width = usize::try_from(self.cols).ok()?;
        row.checked_mul(width)?.checked_add(col)
    }
}

fn cell_count(rows: u32, cols: u32) -> Result<usize, GridError> {
    if rows == 0 || cols == 0 {
        return Err(GridError::ZeroDimension { rows, cols });
    }
    let rows_usize = usize::try_from(rows).map_err(|_| GridError::ZeroDimension { rows, cols })?;
    let cols_usize = usize::try_from(cols).map_err(|_| GridError::ZeroDimension { rows, cols })?;
    rows_usize
        .checked_mul(cols_usize)
        .ok_or(GridError::ZeroDimension { rows, cols })
}
