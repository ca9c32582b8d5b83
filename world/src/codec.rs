//! Flat digit-string board encoding.
//!
//! Boards travel as a row-major sequence of single digits: `0` empty, `1`
//! obstacle, `3` start, `4` goal. Input shorter than `rows * cols` is
//! padded with empty cells; surplus digits are ignored. Exactly one start
//! and one goal marker are expected.

use life_maze_core::{Cell, GridError, GridGeneration, Position};
use thiserror::Error;

/// Decoded board: the initial generation plus the coordinates carved out
/// of its markers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Generation zero of the run.
    pub grid: GridGeneration,
    /// Coordinate of the start marker.
    pub start: Position,
    /// Coordinate of the goal marker.
    pub goal: Position,
}

/// Reasons a digit string cannot be decoded into a board.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A digit outside the `0`/`1`/`3`/`4` vocabulary was encountered.
    #[error("cell {index} holds unsupported digit {digit:?}")]
    UnsupportedDigit {
        /// Row-major index of the offending cell.
        index: usize,
        /// Digit found at that cell.
        digit: char,
    },
    /// No start marker was present in the decoded region.
    #[error("board declares no start marker")]
    MissingStart,
    /// No goal marker was present in the decoded region.
    #[error("board declares no goal marker")]
    MissingGoal,
    /// More than one start marker was present.
    #[error("duplicate start marker at cell {index}")]
    DuplicateStart {
        /// Row-major index of the second start marker.
        index: usize,
    },
    /// More than one goal marker was present.
    #[error("duplicate goal marker at cell {index}")]
    DuplicateGoal {
        /// Row-major index of the second goal marker.
        index: usize,
    },
    /// The declared dimensions are not a valid grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Decodes a row-major digit string into a board. Whitespace is ignored so
/// board files may break lines freely.
pub fn decode(text: &str, rows: u32, cols: u32) -> Result<Board, DecodeError> {
    let grid = GridGeneration::filled(rows, cols)?;
    let cell_total = grid.cells().len();

    let digits: Vec<char> = text.chars().filter(|ch| !ch.is_whitespace()).collect();
    let mut cells = Vec::with_capacity(cell_total);
    let mut start = None;
    let mut goal = None;

    for index in 0..cell_total {
        let cell = match digits.get(index) {
            None => Cell::Empty,
            Some(&digit) => {
                Cell::from_digit(digit).ok_or(DecodeError::UnsupportedDigit { index, digit })?
            }
        };

        let position = position_of(index, cols);
        match cell {
            Cell::Start => {
                if start.replace(position).is_some() {
                    return Err(DecodeError::DuplicateStart { index });
                }
            }
            Cell::Goal => {
                if goal.replace(position).is_some() {
                    return Err(DecodeError::DuplicateGoal { index });
                }
            }
            Cell::Empty | Cell::Obstacle => {}
        }
        cells.push(cell);
    }

    Ok(Board {
        grid: GridGeneration::from_cells(rows, cols, cells)?,
        start: start.ok_or(DecodeError::MissingStart)?,
        goal: goal.ok_or(DecodeError::MissingGoal)?,
    })
}

/// Encodes a generation back into the flat digit representation.
#[must_use]
pub fn encode(grid: &GridGeneration) -> String {
    grid.cells().iter().map(|cell| cell.to_digit()).collect()
}

fn position_of(index: usize, cols: u32) -> Position {
    let cols = u64::from(cols);
    let index = index as u64;
    Position::new((index / cols) as u32, (index % cols) as u32)
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, DecodeError};
    use life_maze_core::{Cell, Position};

    #[test]
    fn decodes_markers_and_obstacles() {
        let board = decode("300\n010\n004", 3, 3).expect("board");
        assert_eq!(board.start, Position::new(0, 0));
        assert_eq!(board.goal, Position::new(2, 2));
        assert_eq!(board.grid.get(Position::new(1, 1)), Some(Cell::Obstacle));
        assert_eq!(board.grid.get(Position::new(0, 1)), Some(Cell::Empty));
    }

    #[test]
    fn short_input_pads_with_empty_cells() {
        let board = decode("34", 2, 2).expect("board");
        assert_eq!(board.start, Position::new(0, 0));
        assert_eq!(board.goal, Position::new(0, 1));
        assert_eq!(board.grid.get(Position::new(1, 0)), Some(Cell::Empty));
        assert_eq!(board.grid.get(Position::new(1, 1)), Some(Cell::Empty));
    }

    #[test]
    fn surplus_digits_are_ignored() {
        let board = decode("3400_this_tail_never_parses", 2, 2).expect("board");
        assert_eq!(board.goal, Position::new(0, 1));
    }

    #[test]
    fn rejects_unknown_digits() {
        let error = decode("3240", 2, 2).expect_err("digit 2 is not a marker");
        assert_eq!(
            error,
            DecodeError::UnsupportedDigit {
                index: 1,
                digit: '2',
            }
        );
    }

    #[test]
    fn rejects_missing_and_duplicate_markers() {
        assert_eq!(decode("0004", 2, 2), Err(DecodeError::MissingStart));
        assert_eq!(decode("3000", 2, 2), Err(DecodeError::MissingGoal));
        assert_eq!(decode("3340", 2, 2), Err(DecodeError::DuplicateStart { index: 1 }));
        assert_eq!(decode("3440", 2, 2), Err(DecodeError::DuplicateGoal { index: 2 }));
    }

    #[test]
    fn encode_round_trips_the_initial_generation() {
        let text = "301000014";
        let board = decode(text, 3, 3).expect("board");
        assert_eq!(encode(&board.grid), text);
    }
}
