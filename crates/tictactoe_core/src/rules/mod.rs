//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Rules are kept apart from the engine so
//! they can be applied to any arrangement of marks, reachable or not.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, winner, winning_line};

use crate::types::{Board, GameStatus};
use tracing::instrument;

/// Evaluates the status of a board.
///
/// A win is checked before a full board, so a last move that both completes
/// a line and fills the grid is a win.
#[instrument(skip(board))]
pub fn status(board: &Board) -> GameStatus {
    if let Some(mark) = winner(board) {
        GameStatus::Win(mark)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
