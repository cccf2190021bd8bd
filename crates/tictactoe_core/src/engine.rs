//! Game engine for tic-tac-toe.
//!
//! [`GameEngine`] is the single owner of a match's board. Every mutation goes
//! through [`GameEngine::apply_move`]; everything else is a read-only query.

use crate::error::MoveError;
use crate::invariants::{EngineInvariants, InvariantSet};
use crate::rules;
use crate::snapshot::BoardSnapshot;
use crate::types::{Board, Cell, Coord, GameStatus, Mark};
use tracing::{debug, instrument};

/// Tic-tac-toe game engine.
///
/// Created fresh for each match: empty board, X to move, no last move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    current_turn: Mark,
    last_move: Option<Coord>,
}

impl GameEngine {
    /// Creates a new game.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_turn: Mark::X,
            last_move: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(board: Board, current_turn: Mark, last_move: Option<Coord>) -> Self {
        Self {
            board,
            current_turn,
            last_move,
        }
    }

    /// Places the current player's mark at `(row, col)`.
    ///
    /// Checks, in order, that the game is not over, that both indices lie in
    /// `0..3`, and that the cell is empty. On success the turn passes to the
    /// other mark, even when the move ends the game.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`], [`MoveError::OutOfBounds`] or
    /// [`MoveError::CellOccupied`]. State is untouched on error.
    #[instrument(skip(self), fields(mark = %self.current_turn))]
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        let status = self.status();
        if status.is_terminal() {
            return Err(MoveError::GameOver(status));
        }

        let coord = Coord::new(row, col);
        let cell = self
            .board
            .get(coord)
            .ok_or(MoveError::OutOfBounds { row, col })?;
        if let Cell::Marked(occupant) = cell {
            return Err(MoveError::CellOccupied { coord, occupant });
        }

        self.board.place(coord, self.current_turn);
        self.last_move = Some(coord);
        self.current_turn = self.current_turn.opponent();

        debug_assert!(
            EngineInvariants::check_all(self).is_ok(),
            "engine invariants violated after move {}",
            coord
        );
        debug!(%coord, next = %self.current_turn, "Move applied");
        Ok(())
    }

    /// Empty cells in row-major order. Empty when the board is full.
    pub fn valid_moves(&self) -> Vec<Coord> {
        Coord::all()
            .filter(|coord| self.board.is_empty(*coord))
            .collect()
    }

    /// First completed line's mark, see [`rules::LINES`] for the order.
    pub fn winner(&self) -> Option<Mark> {
        rules::winner(&self.board)
    }

    /// True iff no cell is empty.
    pub fn is_full(&self) -> bool {
        rules::is_full(&self.board)
    }

    /// Win, draw or in progress. Win takes precedence over draw.
    pub fn status(&self) -> GameStatus {
        rules::status(&self.board)
    }

    /// Returns a reference to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark entitled to move next.
    pub fn current_turn(&self) -> Mark {
        self.current_turn
    }

    /// Most recently applied move, used for highlighting only.
    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    /// Copies the current state into a [`BoardSnapshot`].
    pub fn board_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rows: *self.board.rows(),
            current_turn: self.current_turn,
            last_move: self.last_move,
            status: self.status(),
            valid_moves: self.valid_moves(),
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let engine = GameEngine::new();
        assert_eq!(engine.current_turn(), Mark::X);
        assert_eq!(engine.last_move(), None);
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.valid_moves().len(), 9);
    }

    #[test]
    fn test_apply_move_places_and_flips() {
        let mut engine = GameEngine::new();
        engine.apply_move(1, 2).unwrap();
        assert_eq!(engine.board().get(Coord::new(1, 2)), Some(Cell::Marked(Mark::X)));
        assert_eq!(engine.current_turn(), Mark::O);
        assert_eq!(engine.last_move(), Some(Coord::new(1, 2)));
    }

    #[test]
    fn test_bounds_checked_before_occupancy() {
        let mut engine = GameEngine::new();
        engine.apply_move(0, 0).unwrap();
        assert_eq!(
            engine.apply_move(0, 3),
            Err(MoveError::OutOfBounds { row: 0, col: 3 })
        );
    }

    #[test]
    fn test_game_over_checked_first() {
        let mut engine = GameEngine::new();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            engine.apply_move(row, col).unwrap();
        }
        let before = engine.clone();
        assert_eq!(
            engine.apply_move(9, 9),
            Err(MoveError::GameOver(GameStatus::Win(Mark::X)))
        );
        assert_eq!(engine, before);
    }

    #[test]
    fn test_error_messages() {
        let mut engine = GameEngine::new();
        engine.apply_move(0, 0).unwrap();
        let occupied = engine.apply_move(0, 0).unwrap_err();
        assert!(occupied.to_string().contains("already occupied"));
        let outside = engine.apply_move(5, 1).unwrap_err();
        assert!(outside.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_snapshot_matches_engine() {
        let mut engine = GameEngine::new();
        engine.apply_move(1, 1).unwrap();
        let snapshot = engine.board_snapshot();
        assert_eq!(snapshot.board(), *engine.board());
        assert_eq!(snapshot.current_turn, Mark::O);
        assert_eq!(snapshot.last_move, Some(Coord::new(1, 1)));
        assert_eq!(snapshot.valid_moves, engine.valid_moves());
        assert_eq!(snapshot.to_string(), "  |   |  \n  | X |  \n  |   |  ");
    }
}
