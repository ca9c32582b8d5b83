#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Online navigation without lookahead.
//!
//! The navigator commits one move per turn against the grid as it stands,
//! keeping only enough memory to back out of dead ends: a stack of full
//! snapshots and, per visited path prefix, the set of moves already tried
//! from it. When every untried move from a prefix is blocked, the walk
//! rewinds to the previous snapshot and tries the next-best move there.

pub mod queue;

use std::collections::HashMap;

use life_maze_core::{cost, Direction, GridGeneration, Position};
use life_maze_world::automaton;
use queue::TieBreakingBucketQueue;
use rand::Rng;
use thiserror::Error;

/// Outcome of a single navigation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Committed one move in the given direction.
    Moved(Direction),
    /// Rewound to the previous snapshot.
    Backtracked,
    /// The agent stands on the goal cell.
    Finished,
}

/// Failure modes of the online walk.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NavError {
    /// Every move from every remembered prefix has been tried; there is
    /// nothing left to rewind to.
    #[error("every alternative from the starting cell has been exhausted")]
    BacktrackExhausted,
    /// The turn budget ran out before the goal was reached.
    #[error("goal not reached within {max_turns} turns")]
    OutOfTurns {
        /// Turns the walk was allowed.
        max_turns: usize,
    },
}

/// Scores the viable moves from `position` against the generation that
/// will be active after the move and proposes the cheapest one, breaking
/// ties at random. Directions listed in `attempted` are skipped. Returns
/// `None` when every direction is attempted, off-grid, or blocked.
pub fn propose_move<R: Rng>(
    position: Position,
    goal: Position,
    grid: &GridGeneration,
    attempted: &[Direction],
    rng: &mut R,
) -> Option<Direction> {
    let upcoming = automaton::advance(grid);
    let mut queue = TieBreakingBucketQueue::new();
    for direction in Direction::ALL {
        if attempted.contains(&direction) {
            continue;
        }
        let Some(candidate) = position.step(direction) else {
            continue;
        };
        if !upcoming.contains(candidate) || upcoming.is_obstacle(candidate) {
            continue;
        }
        queue.push(cost::directional_cost(candidate, goal, direction), direction);
    }
    queue.pop(rng)
}

/// Frozen walk state the navigator can rewind to.
#[derive(Clone, Debug)]
struct Snapshot {
    grid: GridGeneration,
    position: Position,
    path: Vec<Position>,
    moves: Vec<Direction>,
}

/// Greedy one-move-at-a-time navigator with snapshot backtracking.
///
/// The attempted-move memory is keyed by the exact path prefix, not by the
/// cell alone: revisiting a cell along a different route starts with a
/// clean slate, because the grid generation differs too.
#[derive(Clone, Debug)]
pub struct IncrementalNavigator<R: Rng> {
    goal: Position,
    stack: Vec<Snapshot>,
    attempted: HashMap<Vec<Position>, Vec<Direction>>,
    rng: R,
}

impl<R: Rng> IncrementalNavigator<R> {
    /// Creates a navigator at `start` on generation zero of `grid`.
    pub fn new(start: Position, goal: Position, grid: GridGeneration, rng: R) -> Self {
        Self {
            goal,
            stack: vec![Snapshot {
                grid,
                position: start,
                path: vec![start],
                moves: Vec::new(),
            }],
            attempted: HashMap::new(),
            rng,
        }
    }

    /// Executes one turn: commit the cheapest untried move, or rewind one
    /// snapshot when no move is viable.
    pub fn step(&mut self) -> Result<StepOutcome, NavError> {
        let current = self.stack.last().expect("the root snapshot is never popped");
        if current.position == self.goal {
            return Ok(StepOutcome::Finished);
        }

        let key = current.path.clone();
        let attempted = self.attempted.entry(key).or_default();
        match propose_move(
            current.position,
            self.goal,
            &current.grid,
            attempted.as_slice(),
            &mut self.rng,
        ) {
            Some(direction) => {
                attempted.push(direction);
                let next_grid = automaton::advance(&current.grid);
                let next_position = current
                    .position
                    .step(direction)
                    .expect("proposed moves stay inside the grid");
                let mut path = current.path.clone();
                path.push(next_position);
                let mut moves = current.moves.clone();
                moves.push(direction);
                self.stack.push(Snapshot {
                    grid: next_grid,
                    position: next_position,
                    path,
                    moves,
                });
                Ok(StepOutcome::Moved(direction))
            }
            None if self.stack.len() == 1 => Err(NavError::BacktrackExhausted),
            None => {
                let _ = self.stack.pop();
                Ok(StepOutcome::Backtracked)
            }
        }
    }

    /// Runs turns until the goal is reached and returns the committed
    /// moves, giving up after `max_turns` turns.
    pub fn run(&mut self, max_turns: usize) -> Result<Vec<Direction>, NavError> {
        for _ in 0..max_turns {
            if self.step()? == StepOutcome::Finished {
                return Ok(self.moves().to_vec());
            }
        }
        Err(NavError::OutOfTurns { max_turns })
    }

    /// Cell the agent currently occupies.
    #[must_use]
    pub fn position(&self) -> Position {
        self.stack
            .last()
            .expect("the root snapshot is never popped")
            .position
    }

    /// Cells along the current committed route, starting cell included.
    #[must_use]
    pub fn path(&self) -> &[Position] {
        &self
            .stack
            .last()
            .expect("the root snapshot is never popped")
            .path
    }

    /// Moves along the current committed route.
    #[must_use]
    pub fn moves(&self) -> &[Direction] {
        &self
            .stack
            .last()
            .expect("the root snapshot is never popped")
            .moves
    }
}
