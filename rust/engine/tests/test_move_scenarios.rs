use line98_engine::cells::Color;
use line98_engine::engine::Engine;
use line98_engine::errors::MoveError;
use line98_engine::game::{GameStatus, OwnerId, Session};
use line98_engine::grid::{to_coord, to_index, Board, SPAWN_COUNT, TOTAL_CELLS};

fn session_with(board: Board, queue: &str) -> Session {
    Session::from_parts(
        OwnerId::new("player-1"),
        board,
        queue.parse().expect("queue"),
        0,
        GameStatus::InProgress,
    )
}

/// Full board with no run longer than one in any direction.
fn stalled_board() -> Board {
    let mut board = Board::empty();
    for idx in 0..TOTAL_CELLS {
        let (row, col) = to_coord(idx);
        board.place(idx, Color::ALL[(row * 3 + col) % Color::ALL.len()]);
    }
    board
}

#[test]
fn completing_five_clears_and_skips_spawn() {
    let mut board = Board::empty();
    for c in 0..4 {
        board.place(to_index(0, c), Color::Red);
    }
    board.place(to_index(5, 5), Color::Red);
    let mut session = session_with(board, "GBY");
    let mut engine = Engine::new(Some(11));

    let outcome = engine
        .apply_move(&mut session, to_index(5, 5), to_index(0, 4))
        .expect("move accepted");

    assert_eq!(outcome.cleared, (0..5).collect::<Vec<_>>());
    assert_eq!(outcome.gained, 5);
    assert!(outcome.spawned.is_empty());
    assert!(!outcome.finished);
    assert_eq!(session.score(), 5);
    assert_eq!(session.board().ball_count(), 0);
    for c in 0..5 {
        assert!(session.board().is_empty_at(to_index(0, c)));
    }
    // the queue is only consumed by a spawn
    assert_eq!(session.spawn_queue().to_string(), "GBY");
}

#[test]
fn four_in_a_row_spawns_the_queue() {
    let mut board = Board::empty();
    for c in 0..3 {
        board.place(to_index(0, c), Color::Red);
    }
    board.place(to_index(5, 5), Color::Red);
    let mut session = session_with(board, "GBY");
    let mut engine = Engine::new(Some(11));

    let outcome = engine
        .apply_move(&mut session, to_index(5, 5), to_index(0, 3))
        .expect("move accepted");

    assert_eq!(outcome.gained, 0);
    assert!(outcome.cleared.is_empty());
    assert_eq!(outcome.spawned.len(), SPAWN_COUNT);
    let colors: Vec<Color> = outcome.spawned.iter().map(|(_, c)| *c).collect();
    assert_eq!(colors, vec![Color::Green, Color::Blue, Color::Yellow]);
    assert_eq!(session.score(), 0);
    assert_eq!(session.board().ball_count(), 4 + SPAWN_COUNT);
    for c in 0..4 {
        assert_eq!(session.board().color_at(to_index(0, c)), Some(Color::Red));
    }
}

#[test]
fn spawn_that_completes_a_line_is_cleared_and_scored() {
    // After the move exactly three cells are empty, two of them gaps in a
    // red row, so an all-red spawn has to complete the run.
    let mut board = stalled_board();
    for c in 0..4 {
        board.set(to_index(0, c), line98_engine::cells::Cell::Empty);
    }
    board.place(to_index(0, 1), Color::Red);
    board.place(to_index(0, 2), Color::Red);
    // row 0 is now: - R R - <rest of row from the pattern>
    board.place(to_index(0, 4), Color::Red);
    board.place(to_index(0, 5), Color::Red);
    // free one more cell far away so the move has somewhere to go
    let free = to_index(8, 8);
    board.set(free, line98_engine::cells::Cell::Empty);
    let from = to_index(8, 7);

    // empties: (0,0), (0,3), (8,8) -> after move (8,7)->(8,8): (0,0), (0,3), (8,7)
    let mut session = session_with(board, "RRR");
    let mut engine = Engine::new(Some(4));
    let outcome = engine.apply_move(&mut session, from, free).expect("move");

    assert_eq!(outcome.spawned.len(), SPAWN_COUNT);
    assert_eq!(outcome.cleared, (0..6).collect::<Vec<_>>());
    assert_eq!(outcome.gained, 6);
    assert_eq!(session.score(), outcome.gained);
    assert!(session.board().is_empty_at(to_index(0, 3)));
}

#[test]
fn stalled_board_rejects_every_move_and_stays_finished() {
    let mut session = session_with(stalled_board(), "RGB");
    assert_eq!(session.status(), GameStatus::Finished);
    let before = session.clone();
    let mut engine = Engine::new(Some(1));

    for (from, to) in [(0, 1), (10, 80), (5, 5), (0, 200)] {
        let err = engine.apply_move(&mut session, from, to).unwrap_err();
        assert_eq!(err, MoveError::GameFinished);
        assert!(err.is_client_error());
    }
    assert_eq!(session, before);
}

#[test]
fn finished_session_is_frozen_after_board_full() {
    let mut board = stalled_board();
    board.set(79, line98_engine::cells::Cell::Empty);
    board.set(80, line98_engine::cells::Cell::Empty);
    let mut session = session_with(board, "MMM");
    let mut engine = Engine::new(Some(2));

    let err = engine.apply_move(&mut session, 78, 79).unwrap_err();
    assert!(matches!(err, MoveError::BoardFull { .. }));
    assert!(session.is_finished());

    let frozen = session.clone();
    assert_eq!(
        engine.apply_move(&mut session, 79, 78),
        Err(MoveError::GameFinished)
    );
    assert_eq!(session, frozen);
}

#[test]
fn move_that_fills_the_board_without_a_clear_finishes_the_game() {
    // Four empty cells: the move uses one, the spawn fills the other three.
    let mut board = stalled_board();
    for idx in [77, 78, 79, 80] {
        board.set(idx, line98_engine::cells::Cell::Empty);
    }
    board.place(78, Color::Cyan);
    // empties are 77, 79, 80; moving 78 -> 79 leaves 77, 78, 80
    let mut session = session_with(board, "RGB");
    let mut engine = Engine::new(Some(6));

    let outcome = engine.apply_move(&mut session, 78, 79).expect("move");
    assert_eq!(outcome.spawned.len(), SPAWN_COUNT);
    if outcome.cleared.is_empty() {
        assert!(outcome.finished);
        assert!(session.is_finished());
        assert!(session.board().is_full());
    } else {
        assert!(!outcome.finished);
        assert!(!session.is_finished());
    }
}

#[test]
fn unreachable_destination_is_rejected_without_mutation() {
    let mut board = Board::empty();
    // wall off the top-left corner
    board.place(to_index(0, 1), Color::Blue);
    board.place(to_index(1, 0), Color::Blue);
    board.place(to_index(5, 5), Color::Red);
    let mut session = session_with(board, "RGB");
    let before = session.clone();
    let mut engine = Engine::new(Some(3));

    let err = engine
        .apply_move(&mut session, to_index(5, 5), to_index(0, 0))
        .unwrap_err();
    assert_eq!(
        err,
        MoveError::NoPath {
            from: to_index(5, 5),
            to: 0
        }
    );
    assert_eq!(session, before);
}

#[test]
fn seeded_engines_play_identical_games() {
    fn play(seed: u64) -> Vec<Session> {
        let mut engine = Engine::new(Some(seed));
        let mut session = engine.create_session("p");
        let mut history = vec![session.clone()];
        for _ in 0..20 {
            let board = session.board();
            let Some(from) = (0..TOTAL_CELLS).find(|&i| !board.is_empty_at(i)) else {
                break;
            };
            let Some(to) = (0..TOTAL_CELLS)
                .rev()
                .find(|&i| line98_engine::path::is_reachable(board, from, i) && i != from)
            else {
                break;
            };
            if engine.apply_move(&mut session, from, to).is_err() {
                break;
            }
            history.push(session.clone());
        }
        history
    }

    assert_eq!(play(2024), play(2024));
    assert_ne!(play(2024), play(2025));
}
