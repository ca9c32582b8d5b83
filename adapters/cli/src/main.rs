#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plans or walks a board and replays the
//! resulting route to verify it survives the evolving grid.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use life_maze_core::{direction_between, Direction, Position};
use life_maze_system_navigator::IncrementalNavigator;
use life_maze_system_planner::{LimitPolicy, PlanError, PlannerConfig, TimeExpandedPlanner};
use life_maze_world::{codec, Board, Session, SessionStatus};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Built-in 10x10 demonstration board with a small obstacle block midway.
const DEMO_BOARD: &str = concat!(
    "3000000000",
    "0000000000",
    "0000000000",
    "0000110000",
    "0000110000",
    "0000110000",
    "0000000000",
    "0000000000",
    "0000000000",
    "0000000004",
);
const DEMO_ROWS: u32 = 10;
const DEMO_COLS: u32 = 10;

/// Solves boards whose obstacles evolve under a birth/survival rule.
#[derive(Parser)]
#[command(name = "life-maze")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Plans a complete route offline before the first move.
    Plan {
        #[command(flatten)]
        board: BoardArgs,
        /// Heuristic weight; values above one favour speed over optimality.
        #[arg(long, default_value_t = 3.0)]
        weight: f64,
        /// Node expansion ceiling before the search gives up.
        #[arg(long, default_value_t = 50_000)]
        limit: usize,
        /// On exhaustion, report the partial route closest to the goal.
        #[arg(long)]
        best_effort: bool,
    },
    /// Walks the board one greedy move at a time with backtracking.
    Walk {
        #[command(flatten)]
        board: BoardArgs,
        /// Seed for the tie-breaking randomness.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Turn budget before the walk gives up.
        #[arg(long, default_value_t = 512)]
        max_turns: usize,
    },
}

#[derive(Args)]
struct BoardArgs {
    /// Path to a digit-string board file; the demo board is used when
    /// omitted.
    #[arg(long)]
    board: Option<PathBuf>,
    /// Number of board rows.
    #[arg(long, default_value_t = DEMO_ROWS)]
    rows: u32,
    /// Number of board columns.
    #[arg(long, default_value_t = DEMO_COLS)]
    cols: u32,
}

impl BoardArgs {
    fn load(&self) -> anyhow::Result<Board> {
        let text = match &self.board {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("reading board file {}", path.display()))?,
            None => DEMO_BOARD.to_owned(),
        };
        codec::decode(&text, self.rows, self.cols).context("decoding the board")
    }
}

fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        Command::Plan {
            board,
            weight,
            limit,
            best_effort,
        } => plan(&board.load()?, weight, limit, best_effort),
        Command::Walk {
            board,
            seed,
            max_turns,
        } => walk(&board.load()?, seed, max_turns),
    }
}

fn plan(board: &Board, weight: f64, limit: usize, best_effort: bool) -> anyhow::Result<()> {
    let planner = TimeExpandedPlanner::new(PlannerConfig {
        heuristic_weight: weight,
        expansion_limit: limit,
        limit_policy: if best_effort {
            LimitPolicy::BestEffort
        } else {
            LimitPolicy::Fail
        },
    });

    let path = match planner.plan(board.start, board.goal, board.grid.clone()) {
        Ok(path) => path,
        Err(PlanError::Exhausted {
            expansions,
            partial: Some(partial),
        }) => {
            println!(
                "gave up after {expansions} expansions; best effort stops at {:?}",
                partial.last().expect("partial routes are never empty")
            );
            bail!("expansion ceiling of {limit} reached");
        }
        Err(error) => return Err(error.into()),
    };

    let moves = moves_of(&path)?;
    println!("route: {}", format_moves(&moves));
    replay(board, &moves)
}

fn walk(board: &Board, seed: u64, max_turns: usize) -> anyhow::Result<()> {
    let mut navigator = IncrementalNavigator::new(
        board.start,
        board.goal,
        board.grid.clone(),
        ChaCha8Rng::seed_from_u64(seed),
    );
    let moves = navigator.run(max_turns).context("walking the board")?;
    println!("route: {}", format_moves(&moves));
    replay(board, &moves)
}

/// Replays `moves` through a fresh session and renders the final frame.
fn replay(board: &Board, moves: &[Direction]) -> anyhow::Result<()> {
    let mut session = Session::new(board);
    for &direction in moves {
        session.apply_move(direction);
    }
    print!("{}", render(&session));
    match session.status() {
        SessionStatus::Won => {
            println!("reached the goal in {} moves", session.moves().len());
            Ok(())
        }
        status => bail!(
            "replay ended in {status:?} after {} moves",
            session.moves().len()
        ),
    }
}

fn moves_of(path: &[Position]) -> anyhow::Result<Vec<Direction>> {
    path.windows(2)
        .map(|pair| {
            direction_between(pair[0], pair[1])
                .ok_or_else(|| anyhow!("route jumps from {:?} to {:?}", pair[0], pair[1]))
        })
        .collect()
}

fn format_moves(moves: &[Direction]) -> String {
    moves
        .iter()
        .map(|direction| match direction {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        })
        .collect()
}

fn render(session: &Session) -> String {
    let grid = session.grid();
    let mut out = String::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let position = Position::new(row, col);
            let glyph = if position == session.player() {
                '@'
            } else if position == session.goal() {
                'G'
            } else if grid.is_obstacle(position) {
                '#'
            } else {
                '.'
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{format_moves, moves_of, render, DEMO_BOARD, DEMO_COLS, DEMO_ROWS};
    use life_maze_core::{Direction, Position};
    use life_maze_world::{codec, Session};

    #[test]
    fn demo_board_decodes() {
        let board = codec::decode(DEMO_BOARD, DEMO_ROWS, DEMO_COLS).expect("demo board");
        assert_eq!(board.start, Position::new(0, 0));
        assert_eq!(board.goal, Position::new(9, 9));
    }

    #[test]
    fn routes_format_as_single_letters() {
        let path = [
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(2, 2),
            Position::new(2, 1),
            Position::new(1, 1),
        ];
        let moves = moves_of(&path).expect("contiguous path");
        assert_eq!(format_moves(&moves), "RDLU");
    }

    #[test]
    fn discontiguous_routes_are_rejected() {
        let path = [Position::new(0, 0), Position::new(2, 2)];
        assert!(moves_of(&path).is_err());
    }

    #[test]
    fn rendering_marks_player_goal_and_obstacles() {
        let board = codec::decode("304110", 2, 3).expect("board");
        let session = Session::new(&board);
        assert_eq!(render(&session), "@.G\n##.\n");
    }

    #[test]
    fn moves_format_round_trips_direction_order() {
        assert_eq!(
            format_moves(&[Direction::Up, Direction::Down, Direction::Left, Direction::Right]),
            "UDLR"
        );
    }
}
