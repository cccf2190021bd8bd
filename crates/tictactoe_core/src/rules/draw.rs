//! Draw detection logic for tic-tac-toe.

use super::win::winner;
use crate::types::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (no empty cell left).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().all(|(_, cell)| cell != Cell::Empty)
}

/// A full board with no completed line.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && winner(board).is_none()
}
