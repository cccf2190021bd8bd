//! Tests for the tic-tac-toe engine.

use tictactoe_core::invariants::{EngineInvariants, InvariantSet};
use tictactoe_core::{Board, Cell, Coord, GameEngine, GameStatus, Mark, MoveError};

const X: Cell = Cell::Marked(Mark::X);
const O: Cell = Cell::Marked(Mark::O);

fn play(moves: &[(usize, usize)]) -> GameEngine {
    let mut engine = GameEngine::new();
    for &(row, col) in moves {
        engine.apply_move(row, col).expect("legal move");
    }
    engine
}

#[test]
fn test_row_win() {
    let engine = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    assert_eq!(engine.status(), GameStatus::Win(Mark::X));
    assert_eq!(engine.winner(), Some(Mark::X));
}

#[test]
fn test_draw() {
    let engine = play(&[
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 1),
        (1, 0),
        (1, 2),
        (2, 1),
        (2, 0),
        (2, 2),
    ]);
    assert_eq!(engine.winner(), None);
    assert!(engine.is_full());
    assert!(engine.valid_moves().is_empty());
    assert_eq!(engine.status(), GameStatus::Draw);
}

#[test]
fn test_occupied_cell_rejected() {
    let mut engine = play(&[(0, 0)]);
    let before = engine.clone();

    let result = engine.apply_move(0, 0);

    assert_eq!(
        result,
        Err(MoveError::CellOccupied {
            coord: Coord::new(0, 0),
            occupant: Mark::X,
        })
    );
    assert_eq!(engine.current_turn(), Mark::O);
    assert_eq!(engine, before);
}

#[test]
fn test_out_of_bounds_rejected() {
    let mut engine = play(&[(1, 1), (0, 0)]);
    let before = engine.clone();

    for (row, col) in [(3, 0), (0, 3), (3, 3), (usize::MAX, 1), (1, usize::MAX)] {
        assert_eq!(
            engine.apply_move(row, col),
            Err(MoveError::OutOfBounds { row, col })
        );
        assert_eq!(engine, before);
    }
}

#[test]
fn test_final_move_that_fills_and_wins_is_a_win() {
    let engine = play(&[
        (0, 0),
        (0, 1),
        (1, 1),
        (0, 2),
        (1, 2),
        (1, 0),
        (2, 0),
        (2, 1),
        (2, 2),
    ]);
    assert!(engine.is_full());
    assert_eq!(engine.status(), GameStatus::Win(Mark::X));
}

#[test]
fn test_diagonal_boards() {
    let main = Board::from_rows([[X, O, O], [O, X, O], [O, O, X]]);
    assert_eq!(tictactoe_core::rules::winner(&main), Some(Mark::X));

    let anti = Board::from_rows([[O, O, X], [O, X, O], [X, O, O]]);
    assert_eq!(tictactoe_core::rules::winner(&anti), Some(Mark::X));
}

#[test]
fn test_moves_rejected_after_win() {
    let mut engine = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    let before = engine.clone();

    assert_eq!(
        engine.apply_move(2, 2),
        Err(MoveError::GameOver(GameStatus::Win(Mark::X)))
    );
    assert_eq!(engine, before);
    // The winning move still passed the turn.
    assert_eq!(engine.current_turn(), Mark::O);
}

#[test]
fn test_valid_moves_row_major() {
    let engine = play(&[(0, 1), (2, 2), (1, 0)]);
    let expected: Vec<Coord> = [(0, 0), (0, 2), (1, 1), (1, 2), (2, 0), (2, 1)]
        .into_iter()
        .map(Coord::from)
        .collect();
    assert_eq!(engine.valid_moves(), expected);
}

#[test]
fn test_snapshot_serializes() {
    let engine = play(&[(2, 0)]);
    let json = serde_json::to_value(engine.board_snapshot()).unwrap();
    assert_eq!(json["current_turn"], "O");
    assert_eq!(json["last_move"]["row"], 2);
    assert_eq!(json["valid_moves"].as_array().unwrap().len(), 8);
}

#[derive(Default)]
struct Tally {
    games: usize,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

/// Walks every reachable position, checking the engine's properties at each.
fn walk(engine: &GameEngine, depth: usize, tally: &mut Tally) {
    let expected_turn = if depth % 2 == 0 { Mark::X } else { Mark::O };
    assert_eq!(engine.current_turn(), expected_turn);
    assert_eq!(engine.valid_moves().len() + engine.board().filled(), 9);
    assert!(EngineInvariants::check_all(engine).is_ok());

    match engine.status() {
        GameStatus::Win(mark) => {
            tally.games += 1;
            match mark {
                Mark::X => tally.x_wins += 1,
                Mark::O => tally.o_wins += 1,
            }
            return;
        }
        GameStatus::Draw => {
            assert!(engine.valid_moves().is_empty());
            tally.games += 1;
            tally.draws += 1;
            return;
        }
        GameStatus::InProgress => {}
    }

    for coord in Coord::all() {
        let mut next = engine.clone();
        match next.apply_move(coord.row, coord.col) {
            Ok(()) => walk(&next, depth + 1, tally),
            Err(MoveError::CellOccupied { .. }) => assert_eq!(&next, engine),
            Err(other) => panic!("unexpected rejection {other}"),
        }
    }
}

#[test]
fn test_every_game_keeps_properties() {
    let mut tally = Tally::default();
    walk(&GameEngine::new(), 0, &mut tally);

    assert_eq!(tally.games, 255_168);
    assert_eq!(tally.x_wins, 131_184);
    assert_eq!(tally.o_wins, 77_904);
    assert_eq!(tally.draws, 46_080);
}
