//! Pure tic-tac-toe rules.
//!
//! This crate owns the board, move validation, turn alternation and
//! win/draw detection. It knows nothing about who proposes moves or how the
//! game is shown; those live in the orchestration layer.
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{GameEngine, GameStatus, Mark};
//!
//! let mut engine = GameEngine::new();
//! for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
//!     engine.apply_move(row, col)?;
//! }
//! assert_eq!(engine.status(), GameStatus::Win(Mark::X));
//! # Ok::<(), tictactoe_core::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod snapshot;
mod types;

pub mod invariants;
pub mod rules;

pub use engine::GameEngine;
pub use error::MoveError;
pub use snapshot::BoardSnapshot;
pub use types::{Board, Cell, Coord, GameStatus, Mark, SIZE};
