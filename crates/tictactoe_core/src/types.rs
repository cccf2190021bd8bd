//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Side length of the board.
pub const SIZE: usize = 3;

/// Mark placed by a player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Mark X (moves first).
    X,
    /// Mark O (moves second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No mark yet.
    Empty,
    /// Cell holds a mark.
    Marked(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(mark) => Some(mark),
        }
    }

    /// Single-character symbol, a space for an empty cell.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Marked(Mark::X) => 'X',
            Cell::Marked(Mark::O) => 'O',
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Cell::Marked(mark)
    }
}

/// Row/column coordinate on the board, both zero-based.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("{row},{col}")]
pub struct Coord {
    /// Row index, top row is 0.
    pub row: usize,
    /// Column index, left column is 0.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate. No range check is done here.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when both indices lie in `0..3`.
    pub fn in_bounds(self) -> bool {
        self.row < SIZE && self.col < SIZE
    }

    /// All nine coordinates in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..SIZE).flat_map(|row| (0..SIZE).map(move |col| Coord::new(row, col)))
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; SIZE]; SIZE],
        }
    }

    /// Builds a board from explicit rows.
    ///
    /// Any arrangement is accepted, including ones no legal game reaches.
    pub fn from_rows(cells: [[Cell; SIZE]; SIZE]) -> Self {
        Self { cells }
    }

    /// Gets the cell at `coord`, or `None` when out of bounds.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.cells
            .get(coord.row)
            .and_then(|row| row.get(coord.col))
            .copied()
    }

    /// Checks if the cell at `coord` is in bounds and empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Cell::Empty))
    }

    /// Returns the rows of the board.
    pub fn rows(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    /// Iterates every cell with its coordinate, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        Coord::all().map(|coord| (coord, self.cells[coord.row][coord.col]))
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells()
            .filter(|(_, cell)| *cell == Cell::Marked(mark))
            .count()
    }

    /// Number of non-empty cells.
    pub fn filled(&self) -> usize {
        Mark::iter().map(|mark| self.count(mark)).sum()
    }

    /// Writes `mark` into `coord`. Callers validate first.
    pub(crate) fn place(&mut self, coord: Coord, mark: Mark) {
        self.cells[coord.row][coord.col] = Cell::Marked(mark);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Rows of cells joined by ` | `, empty cells shown as a space.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, row) in self.cells.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .map(|cell| cell.symbol().to_string())
                .collect::<Vec<_>>()
                .join(" | ");
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// A line of three was completed by this mark.
    Win(Mark),
    /// Board is full with no completed line.
    Draw,
}

impl GameStatus {
    /// True for `Win` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameStatus::Win(mark) => Some(mark),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "Game in progress"),
            GameStatus::Win(mark) => write!(f, "Player {} wins!", mark),
            GameStatus::Draw => write!(f, "It's a draw!"),
        }
    }
}
