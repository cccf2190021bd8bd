//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Coord, Mark};
use tracing::instrument;

/// The eight winning lines in evaluation order.
pub const LINES: [[Coord; 3]; 8] = [
    // Rows
    [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)],
    [Coord::new(1, 0), Coord::new(1, 1), Coord::new(1, 2)],
    [Coord::new(2, 0), Coord::new(2, 1), Coord::new(2, 2)],
    // Columns
    [Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)],
    [Coord::new(0, 1), Coord::new(1, 1), Coord::new(2, 1)],
    [Coord::new(0, 2), Coord::new(1, 2), Coord::new(2, 2)],
    // Diagonals
    [Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)],
    [Coord::new(0, 2), Coord::new(1, 1), Coord::new(2, 0)],
];

/// Returns the first completed line in [`LINES`] order with its mark.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Mark, [Coord; 3])> {
    LINES.into_iter().find_map(|line @ [a, b, c]| {
        let cell = board.get(a)?;
        match cell {
            Cell::Marked(mark) if board.get(b) == Some(cell) && board.get(c) == Some(cell) => {
                Some((mark, line))
            }
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` for the first line holding three identical marks,
/// `None` otherwise.
pub fn winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}
