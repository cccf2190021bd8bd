//! Read-only projection of engine state for presentation and prompts.

use crate::types::{Board, Cell, Coord, GameStatus, Mark, SIZE};
use serde::{Deserialize, Serialize};

/// Point-in-time copy of everything a move source or renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Cells, row-major.
    pub rows: [[Cell; SIZE]; SIZE],
    /// Mark entitled to move next.
    pub current_turn: Mark,
    /// Most recent accepted move.
    pub last_move: Option<Coord>,
    /// Status at the time of the snapshot.
    pub status: GameStatus,
    /// Empty cells, row-major.
    pub valid_moves: Vec<Coord>,
}

impl BoardSnapshot {
    /// Rebuilds the board the snapshot was taken from.
    pub fn board(&self) -> Board {
        Board::from_rows(self.rows)
    }
}

impl std::fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board())
    }
}
