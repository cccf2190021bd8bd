//! Move rejection errors.

use crate::types::{Coord, GameStatus, Mark};

/// Error returned when a move is rejected.
///
/// A rejected move never changes the engine: board, turn and last move stay
/// exactly as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game already reached a win or a draw.
    #[display("Invalid move: game is already over ({})", _0)]
    GameOver(GameStatus),

    /// Row or column lies outside `0..3`.
    #[display("Invalid move: position ({}, {}) is out of bounds", row, col)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already holds a mark.
    #[display("Invalid move: position {} is already occupied by {}", coord, occupant)]
    CellOccupied {
        /// Requested cell.
        coord: Coord,
        /// Mark already in the cell.
        occupant: Mark,
    },
}

impl std::error::Error for MoveError {}
