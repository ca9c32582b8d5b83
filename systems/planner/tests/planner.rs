use life_maze_core::Position;
use life_maze_system_planner::{PlanError, TimeExpandedPlanner};
use life_maze_world::{codec, Session, SessionStatus};

fn plan(text: &str, rows: u32, cols: u32) -> Result<Vec<Position>, PlanError> {
    let board = codec::decode(text, rows, cols).expect("test board");
    TimeExpandedPlanner::default().plan(board.start, board.goal, board.grid)
}

#[test]
fn open_grid_paths_match_the_manhattan_distance() {
    let path = plan(concat!("300", "000", "004"), 3, 3).expect("path");
    assert_eq!(path.len(), 5);
    assert_eq!(path.first(), Some(&Position::new(0, 0)));
    assert_eq!(path.last(), Some(&Position::new(2, 2)));
}

#[test]
fn crosses_an_obstacle_cell_once_it_decays() {
    // The obstacle between start and goal is isolated and decays in the
    // very first generation, so the straight line is free by the time the
    // agent would enter it.
    let path = plan("314", 1, 3).expect("path");
    assert_eq!(
        path,
        vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
    );
}

#[test]
fn reports_no_path_when_the_start_stays_walled_in() {
    // Each orthogonal neighbour of the start sits in a ring of obstacles
    // and counts exactly four live cells, so it survives into the next
    // generation and the first expansion yields no successor at all.
    let text = concat!("40000", "01110", "01310", "01110", "00000");
    let error = plan(text, 5, 5).expect_err("the ring never opens");
    assert_eq!(error, PlanError::NoPath);
}

#[test]
fn planned_paths_are_contiguous() {
    let text = concat!("30000", "01100", "00100", "00000", "00004");
    let path = plan(text, 5, 5).expect("path");
    for pair in path.windows(2) {
        assert_eq!(
            pair[0].manhattan_distance(pair[1]),
            1,
            "{:?} -> {:?} is not a single orthogonal step",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn planning_is_deterministic() {
    let text = concat!("30000", "01100", "00100", "00000", "00004");
    let first = plan(text, 5, 5).expect("path");
    let second = plan(text, 5, 5).expect("path");
    assert_eq!(first, second);
}

#[test]
fn replaying_a_plan_wins_the_session() {
    // Every planned move was validated against the generation active
    // after that move, so step-by-step replay never lands on a live cell.
    let text = concat!("30000", "01100", "00100", "00000", "00004");
    let board = codec::decode(text, 5, 5).expect("test board");
    let path = TimeExpandedPlanner::default()
        .plan(board.start, board.goal, board.grid.clone())
        .expect("path");

    let mut session = Session::new(&board);
    for pair in path.windows(2) {
        let direction =
            life_maze_core::direction_between(pair[0], pair[1]).expect("contiguous plan");
        session.apply_move(direction);
    }
    assert_eq!(session.status(), SessionStatus::Won);
    assert_eq!(session.player(), board.goal);
}
