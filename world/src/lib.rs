#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! The evolving grid world: transition rule, generation memoization, board
//! codec, and turn-by-turn session bookkeeping.

pub mod automaton;
pub mod codec;

pub use codec::Board;

use life_maze_core::{Direction, GridGeneration, Position};

/// Memoized ladder of automaton generations for a single run.
///
/// Depth 0 is the caller-supplied initial grid; deeper generations are
/// computed lazily and never recomputed or invalidated. The cache is
/// scoped to one planning run and must not be shared across searches.
#[derive(Clone, Debug)]
pub struct GenerationCache {
    generations: Vec<GridGeneration>,
}

impl GenerationCache {
    /// Creates a cache seeded with generation zero.
    #[must_use]
    pub fn new(initial: GridGeneration) -> Self {
        Self {
            generations: vec![initial],
        }
    }

    /// Generation at `depth`, computing and memoizing every missing rung
    /// below it on the way.
    pub fn get(&mut self, depth: usize) -> &GridGeneration {
        while self.generations.len() <= depth {
            let next = automaton::advance(
                self.generations
                    .last()
                    .expect("cache is seeded with generation zero"),
            );
            self.generations.push(next);
        }
        &self.generations[depth]
    }

    /// Number of generations materialized so far.
    #[must_use]
    pub fn computed(&self) -> usize {
        self.generations.len()
    }
}

/// Progress state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// The agent is still travelling.
    Playing,
    /// The agent reached the goal cell.
    Won,
    /// The agent left the grid or landed on a live cell.
    Lost,
}

/// Turn-by-turn bookkeeping for one agent walking the evolving grid.
///
/// Each applied move advances the grid by one generation; the agent must
/// not be standing on an obstacle of the generation active after the move.
/// Used by the adapter to replay solver output and by tests to check path
/// safety.
#[derive(Clone, Debug)]
pub struct Session {
    grid: GridGeneration,
    player: Position,
    goal: Position,
    status: SessionStatus,
    path: Vec<Position>,
    moves: Vec<Direction>,
}

impl Session {
    /// Starts a session at the board's start marker on generation zero.
    #[must_use]
    pub fn new(board: &Board) -> Self {
        Self {
            grid: board.grid.clone(),
            player: board.start,
            goal: board.goal,
            status: SessionStatus::Playing,
            path: vec![board.start],
            moves: Vec::new(),
        }
    }

    /// Applies one move: shifts the agent, advances the grid a generation,
    /// then settles the outcome. Moves that leave the grid lose the
    /// session immediately; moves applied after the session ended are
    /// ignored.
    pub fn apply_move(&mut self, direction: Direction) {
        if self.status != SessionStatus::Playing {
            return;
        }

        let destination = self.player.step(direction).filter(|p| self.grid.contains(*p));
        let Some(destination) = destination else {
            self.status = SessionStatus::Lost;
            return;
        };

        self.player = destination;
        self.path.push(destination);
        self.moves.push(direction);
        self.grid = automaton::advance(&self.grid);

        if self.grid.is_obstacle(self.player) {
            self.status = SessionStatus::Lost;
        } else if self.player == self.goal {
            self.status = SessionStatus::Won;
        }
    }

    /// Current progress state.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Cell the agent currently occupies.
    #[must_use]
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Goal cell the agent is chasing.
    #[must_use]
    pub const fn goal(&self) -> Position {
        self.goal
    }

    /// Generation the agent is currently standing on.
    #[must_use]
    pub const fn grid(&self) -> &GridGeneration {
        &self.grid
    }

    /// Cells visited so far, starting cell included.
    #[must_use]
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Moves applied so far.
    #[must_use]
    pub fn moves(&self) -> &[Direction] {
        &self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::{codec, GenerationCache, Session, SessionStatus};
    use life_maze_core::{Cell, Direction, GridGeneration, Position};

    #[test]
    fn cache_is_lazy_and_monotonic() {
        let initial = GridGeneration::filled(3, 3).expect("grid");
        let mut cache = GenerationCache::new(initial.clone());
        assert_eq!(cache.computed(), 1);

        let third = cache.get(3).clone();
        assert_eq!(cache.computed(), 4);
        // All-empty grids are a fixed point of the rule.
        assert_eq!(third, initial);

        let first = cache.get(1).clone();
        assert_eq!(cache.computed(), 4);
        assert_eq!(first, initial);
    }

    #[test]
    fn cache_depth_zero_is_the_seed() {
        let cells = vec![Cell::Start, Cell::Obstacle, Cell::Empty, Cell::Goal];
        let initial = GridGeneration::from_cells(2, 2, cells).expect("grid");
        let mut cache = GenerationCache::new(initial.clone());
        assert_eq!(cache.get(0), &initial);
    }

    #[test]
    fn session_wins_on_reaching_the_goal() {
        let board = codec::decode("34", 1, 2).expect("board");
        let mut session = Session::new(&board);
        session.apply_move(Direction::Right);
        assert_eq!(session.status(), SessionStatus::Won);
        assert_eq!(session.player(), Position::new(0, 1));
        assert_eq!(session.path(), &[Position::new(0, 0), Position::new(0, 1)]);
        assert_eq!(session.moves(), &[Direction::Right]);
    }

    #[test]
    fn session_loses_when_leaving_the_grid() {
        let board = codec::decode("34", 1, 2).expect("board");
        let mut session = Session::new(&board);
        session.apply_move(Direction::Up);
        assert_eq!(session.status(), SessionStatus::Lost);
        // The failed move is not recorded.
        assert_eq!(session.moves(), &[] as &[Direction]);
    }

    #[test]
    fn session_loses_on_a_cell_born_under_the_agent() {
        // Moving right onto (0, 1) while (1, 0) and (1, 1) are alive: the
        // destination sees two live neighbours and is born as an obstacle
        // in the generation active after the move.
        let board = codec::decode("304110", 2, 3).expect("board");
        let mut session = Session::new(&board);
        session.apply_move(Direction::Right);
        assert_eq!(session.status(), SessionStatus::Lost);
    }

    #[test]
    fn finished_sessions_ignore_further_moves() {
        let board = codec::decode("34", 1, 2).expect("board");
        let mut session = Session::new(&board);
        session.apply_move(Direction::Right);
        assert_eq!(session.status(), SessionStatus::Won);
        session.apply_move(Direction::Left);
        assert_eq!(session.status(), SessionStatus::Won);
        assert_eq!(session.moves().len(), 1);
    }
}
