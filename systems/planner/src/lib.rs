#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Offline time-expanded search over the evolving grid.
//!
//! The planner explores the three-dimensional state space `(row, col,
//! depth)` where depth counts automaton generations: every transition
//! advances time by exactly one generation, so a cell that is blocked now
//! may be entered later and a cell that is open now may close. Obstacle
//! lookups for depth `d + 1` come from a [`GenerationCache`] owned by the
//! running search.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use life_maze_core::{cost, Direction, GridGeneration, Position};
use life_maze_world::GenerationCache;
use thiserror::Error;

/// Behaviour when the expansion ceiling is reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LimitPolicy {
    /// Report [`PlanError::Exhausted`] with no path material.
    #[default]
    Fail,
    /// Report [`PlanError::Exhausted`] carrying the path to the explored
    /// node closest to the goal by heuristic.
    BestEffort,
}

/// Tuning knobs for [`TimeExpandedPlanner`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Multiplier applied to the heuristic when scoring nodes. Values
    /// above one deliberately trade path optimality for fewer expansions.
    pub heuristic_weight: f64,
    /// Hard ceiling on node expansions; guards against grids whose
    /// automaton never stabilizes into a solvable configuration.
    pub expansion_limit: usize,
    /// What to report when the ceiling is reached.
    pub limit_policy: LimitPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: 3.0,
            expansion_limit: 50_000,
            limit_policy: LimitPolicy::Fail,
        }
    }
}

/// Failure modes of the offline search. Expected search outcomes, not
/// programmer errors.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlanError {
    /// The open set was exhausted: the goal is unreachable under every
    /// generation the search could reach.
    #[error("goal unreachable under every explored generation")]
    NoPath,
    /// The expansion ceiling was reached before the search resolved. A
    /// bounded-effort give-up, not a proof of unreachability.
    #[error("expansion ceiling reached after {expansions} expansions")]
    Exhausted {
        /// Expansions performed before giving up.
        expansions: usize,
        /// Best-effort path toward the goal, present only under
        /// [`LimitPolicy::BestEffort`]. Never a substitute for success:
        /// the final position is not the goal.
        partial: Option<Vec<Position>>,
    },
}

/// Time-expanded state: a grid cell at a specific generation depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct State {
    row: u32,
    col: u32,
    depth: u32,
}

impl State {
    fn position(self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// Arena-allocated search node. One live node exists per state; cost
/// improvements rewrite it in place.
#[derive(Clone, Copy, Debug)]
struct Node {
    state: State,
    parent: Option<usize>,
    cost_so_far: u32,
    score: f64,
}

/// Handle into the open heap. Handles whose recorded cost no longer
/// matches their node are superseded and skipped on pop.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    score: f64,
    cost_so_far: u32,
    state: State,
    node: usize,
    sequence: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reverse so the lowest score pops
        // first, with a fully deterministic tie order.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.state.depth.cmp(&self.state.depth))
            .then_with(|| other.state.row.cmp(&self.state.row))
            .then_with(|| other.state.col.cmp(&self.state.col))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Offline planner that searches the time-expanded state space with a
/// weighted informed search.
#[derive(Clone, Debug, Default)]
pub struct TimeExpandedPlanner {
    config: PlannerConfig,
}

impl TimeExpandedPlanner {
    /// Creates a planner with the provided configuration.
    #[must_use]
    pub const fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Searches for a route from `start` to `goal` across the evolving
    /// grid and returns the visited cells from start to goal inclusive.
    ///
    /// The goal counts as reached at any depth. Uniform step cost; the
    /// combined score is `g + w * h` with the configured weight `w`.
    pub fn plan(
        &self,
        start: Position,
        goal: Position,
        initial: GridGeneration,
    ) -> Result<Vec<Position>, PlanError> {
        debug_assert!(initial.contains(start), "start lies outside the grid");
        debug_assert!(initial.contains(goal), "goal lies outside the grid");

        let mut cache = GenerationCache::new(initial);
        let mut nodes: Vec<Node> = Vec::new();
        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        let mut open_by_state: HashMap<State, usize> = HashMap::new();
        let mut closed: HashSet<State> = HashSet::new();
        let mut sequence: u64 = 0;

        let start_state = State {
            row: start.row(),
            col: start.col(),
            depth: 0,
        };
        let start_estimate = cost::cross_track_heuristic(start, start, goal);
        nodes.push(Node {
            state: start_state,
            parent: None,
            cost_so_far: 0,
            score: self.config.heuristic_weight * start_estimate,
        });
        open.push(OpenEntry {
            score: nodes[0].score,
            cost_so_far: 0,
            state: start_state,
            node: 0,
            sequence,
        });
        let _ = open_by_state.insert(start_state, 0);

        let mut expansions: usize = 0;
        let mut nearest = Nearest {
            node: 0,
            estimate: start_estimate,
        };

        while let Some(entry) = open.pop() {
            let node = nodes[entry.node];
            if entry.cost_so_far != node.cost_so_far || closed.contains(&node.state) {
                // Superseded handle.
                continue;
            }

            if node.state.position() == goal {
                return Ok(reconstruct(&nodes, entry.node));
            }

            if expansions == self.config.expansion_limit {
                let partial = match self.config.limit_policy {
                    LimitPolicy::Fail => None,
                    LimitPolicy::BestEffort => Some(reconstruct(&nodes, nearest.node)),
                };
                return Err(PlanError::Exhausted {
                    expansions,
                    partial,
                });
            }
            expansions += 1;

            let _ = open_by_state.remove(&node.state);
            let _ = closed.insert(node.state);

            let next_depth = node.state.depth + 1;
            let next_generation = cache.get(depth_index(next_depth));

            for direction in Direction::ALL {
                let Some(candidate) = node.state.position().step(direction) else {
                    continue;
                };
                if !next_generation.contains(candidate) || next_generation.is_obstacle(candidate)
                {
                    continue;
                }

                let next_state = State {
                    row: candidate.row(),
                    col: candidate.col(),
                    depth: next_depth,
                };
                if closed.contains(&next_state) {
                    continue;
                }

                let tentative = node.cost_so_far + cost::STEP_COST;
                match open_by_state.get(&next_state) {
                    Some(&existing) if tentative >= nodes[existing].cost_so_far => {}
                    Some(&existing) => {
                        let estimate = cost::cross_track_heuristic(candidate, start, goal);
                        nodes[existing].cost_so_far = tentative;
                        nodes[existing].parent = Some(entry.node);
                        nodes[existing].score =
                            f64::from(tentative) + self.config.heuristic_weight * estimate;
                        sequence += 1;
                        open.push(OpenEntry {
                            score: nodes[existing].score,
                            cost_so_far: tentative,
                            state: next_state,
                            node: existing,
                            sequence,
                        });
                    }
                    None => {
                        let estimate = cost::cross_track_heuristic(candidate, start, goal);
                        let score = f64::from(tentative) + self.config.heuristic_weight * estimate;
                        let index = nodes.len();
                        nodes.push(Node {
                            state: next_state,
                            parent: Some(entry.node),
                            cost_so_far: tentative,
                            score,
                        });
                        let _ = open_by_state.insert(next_state, index);
                        sequence += 1;
                        open.push(OpenEntry {
                            score,
                            cost_so_far: tentative,
                            state: next_state,
                            node: index,
                            sequence,
                        });
                        if estimate < nearest.estimate {
                            nearest = Nearest {
                                node: index,
                                estimate,
                            };
                        }
                    }
                }
            }
        }

        Err(PlanError::NoPath)
    }
}

/// Node closest to the goal by heuristic, kept for best-effort reporting.
#[derive(Clone, Copy, Debug)]
struct Nearest {
    node: usize,
    estimate: f64,
}

fn reconstruct(nodes: &[Node], tail: usize) -> Vec<Position> {
    let mut path = Vec::new();
    let mut cursor = tail;
    loop {
        let node = nodes[cursor];
        path.push(node.state.position());
        match node.parent {
            Some(parent) => cursor = parent,
            None => break,
        }
    }
    path.reverse();
    path
}

fn depth_index(depth: u32) -> usize {
    usize::try_from(depth).expect("generation depth fits usize")
}

#[cfg(test)]
mod tests {
    use super::{LimitPolicy, PlanError, PlannerConfig, TimeExpandedPlanner};
    use life_maze_core::{GridGeneration, Position};

    #[test]
    fn trivial_plan_starts_and_ends_at_the_same_cell() {
        let grid = GridGeneration::filled(3, 3).expect("grid");
        let planner = TimeExpandedPlanner::default();
        let start = Position::new(1, 1);
        let path = planner.plan(start, start, grid).expect("path");
        assert_eq!(path, vec![start]);
    }

    #[test]
    fn path_cost_equals_move_count() {
        // Uniform step cost: the accumulated cost of the returned path is
        // exactly its move count.
        let grid = GridGeneration::filled(4, 4).expect("grid");
        let planner = TimeExpandedPlanner::default();
        let path = planner
            .plan(Position::new(0, 0), Position::new(3, 2), grid)
            .expect("path");
        assert_eq!(path.len() - 1, 5);
    }

    #[test]
    fn exhaustion_reports_expansion_count() {
        let grid = GridGeneration::filled(8, 8).expect("grid");
        let planner = TimeExpandedPlanner::new(PlannerConfig {
            expansion_limit: 3,
            ..PlannerConfig::default()
        });
        let error = planner
            .plan(Position::new(0, 0), Position::new(7, 7), grid)
            .expect_err("three expansions cannot cross an 8x8 grid");
        assert_eq!(
            error,
            PlanError::Exhausted {
                expansions: 3,
                partial: None,
            }
        );
    }

    #[test]
    fn best_effort_partial_path_approaches_the_goal() {
        let grid = GridGeneration::filled(8, 8).expect("grid");
        let planner = TimeExpandedPlanner::new(PlannerConfig {
            expansion_limit: 5,
            limit_policy: LimitPolicy::BestEffort,
            ..PlannerConfig::default()
        });
        let start = Position::new(0, 0);
        let goal = Position::new(7, 7);
        let error = planner.plan(start, goal, grid).expect_err("limited search");
        let PlanError::Exhausted {
            partial: Some(partial),
            ..
        } = error
        else {
            panic!("expected a best-effort partial path, got {error:?}");
        };
        assert_eq!(partial.first(), Some(&start));
        let tail = partial.last().expect("non-empty partial path");
        assert!(tail.manhattan_distance(goal) < start.manhattan_distance(goal));
    }
}
