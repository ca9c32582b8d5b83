//! Birth/survival transition rule that evolves the obstacle field.

use life_maze_core::{Cell, GridGeneration, Position};

const BIRTH_COUNTS: std::ops::RangeInclusive<u8> = 2..=4;
const SURVIVAL_COUNTS: std::ops::RangeInclusive<u8> = 4..=5;

/// Computes the next grid generation under the birth/survival rule.
///
/// Only [`Cell::Obstacle`] counts as alive. An empty cell is born as an
/// obstacle with 2 to 4 live Moore neighbours; a live cell survives with 4
/// or 5. Out-of-range neighbours are absent; there is no wraparound.
///
/// `Start` and `Goal` markers are not alive and decay under the dead-cell
/// rule, so they exist only in the generation they were decoded from. The
/// start and goal coordinates travel separately with the board.
#[must_use]
pub fn advance(generation: &GridGeneration) -> GridGeneration {
    let rows = generation.rows();
    let cols = generation.cols();
    let mut cells = Vec::with_capacity(generation.cells().len());

    for row in 0..rows {
        for col in 0..cols {
            let position = Position::new(row, col);
            let live = live_neighbors(generation, position);
            let next = if generation.is_obstacle(position) {
                if SURVIVAL_COUNTS.contains(&live) {
                    Cell::Obstacle
                } else {
                    Cell::Empty
                }
            } else if BIRTH_COUNTS.contains(&live) {
                Cell::Obstacle
            } else {
                Cell::Empty
            };
            cells.push(next);
        }
    }

    GridGeneration::from_cells(rows, cols, cells)
        .expect("advance preserves the input grid dimensions")
}

fn live_neighbors(generation: &GridGeneration, position: Position) -> u8 {
    let mut count = 0;
    for row_offset in [-1i32, 0, 1] {
        for col_offset in [-1i32, 0, 1] {
            if row_offset == 0 && col_offset == 0 {
                continue;
            }
            let Some(row) = position.row().checked_add_signed(row_offset) else {
                continue;
            };
            let Some(col) = position.col().checked_add_signed(col_offset) else {
                continue;
            };
            if generation.is_obstacle(Position::new(row, col)) {
                count += 1;
            }
        }
    }
    count
}
