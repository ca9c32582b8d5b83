//! Shared scoring model used by both solvers.
//!
//! The offline planner consumes [`cross_track_heuristic`] together with the
//! uniform [`STEP_COST`]; the online navigator scores its one-step
//! candidates with [`directional_cost`].

use crate::{Direction, Position};

/// Uniform cost of a single move; every expansion advances time by exactly
/// one generation.
pub const STEP_COST: u32 = 1;

/// Scale of the cross-track tie-breaking term. Small enough that the term
/// never outweighs a full Manhattan step.
pub const CROSS_TIE_WEIGHT: f64 = 0.001;

const WEIGHT_NEUTRAL: f64 = 1.0;
const WEIGHT_FORWARD: f64 = 0.9;
const WEIGHT_DOMINANT_AXIS: f64 = 0.8;

/// Manhattan distance from `candidate` to `goal` plus a cross-track
/// tie-breaker.
///
/// The cross product of the candidate-to-goal and start-to-goal deltas
/// penalises cells that stray from the straight line between start and
/// goal, so among equally long routes the search settles on a natural
/// looking one with fewer turns.
#[must_use]
pub fn cross_track_heuristic(candidate: Position, start: Position, goal: Position) -> f64 {
    let candidate_row_delta = f64::from(candidate.row().abs_diff(goal.row()));
    let candidate_col_delta = f64::from(candidate.col().abs_diff(goal.col()));
    let start_row_delta = f64::from(start.row().abs_diff(goal.row()));
    let start_col_delta = f64::from(start.col().abs_diff(goal.col()));

    let cross =
        (candidate_row_delta * start_col_delta - start_row_delta * candidate_col_delta).abs();
    (candidate_row_delta + candidate_col_delta) + cross * CROSS_TIE_WEIGHT
}

/// Directional cost of stepping onto `candidate` while chasing `goal`.
///
/// Moves toward increasing row or column indices are slightly cheaper than
/// their opposites, biasing the navigator toward monotonic progress, and
/// the forward move along whichever axis has the strictly larger remaining
/// delta receives a further discount so progress alternates between axes
/// instead of exhausting one first.
#[must_use]
pub fn directional_cost(candidate: Position, goal: Position, direction: Direction) -> f64 {
    let row_delta = f64::from(candidate.row().abs_diff(goal.row()));
    let col_delta = f64::from(candidate.col().abs_diff(goal.col()));

    let weight = match direction {
        Direction::Up | Direction::Left => WEIGHT_NEUTRAL,
        Direction::Down => {
            if row_delta > col_delta {
                WEIGHT_DOMINANT_AXIS
            } else {
                WEIGHT_FORWARD
            }
        }
        Direction::Right => {
            if col_delta > row_delta {
                WEIGHT_DOMINANT_AXIS
            } else {
                WEIGHT_FORWARD
            }
        }
    };

    weight * (row_delta + col_delta)
}
