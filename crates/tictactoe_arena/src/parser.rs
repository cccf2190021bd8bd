//! Extraction of a `(row, col)` pair from free-form text.
//!
//! Move sources such as language models answer in prose. The parser takes the
//! first two runs of ASCII digits as row and column. It does not range-check;
//! the engine does that.

use derive_more::{Display, Error};
use tictactoe_core::Coord;
use tracing::{debug, instrument};

/// Failure to read two integers out of a reply.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseError {
    /// Fewer than two numbers in the text.
    #[display("expected two numbers (row and column), found {}", found)]
    MissingNumbers {
        /// How many numbers were found.
        found: usize,
    },
    /// A digit run does not fit in `usize`.
    #[display("number {} is too large", digits)]
    NumberTooLarge {
        /// The offending digits.
        digits: String,
    },
}

/// Parses the first two numbers in `text` as row and column.
///
/// ```
/// use tictactoe_arena::parse_move;
/// use tictactoe_core::Coord;
///
/// assert_eq!(parse_move("I'll take 1 2").unwrap(), Coord::new(1, 2));
/// assert_eq!(parse_move("(0, 2) blocks the diagonal").unwrap(), Coord::new(0, 2));
/// ```
#[instrument(skip(text), fields(len = text.len()))]
pub fn parse_move(text: &str) -> Result<Coord, ParseError> {
    let numbers = digit_runs(text).take(2).collect::<Vec<_>>();
    let [row, col] = numbers.as_slice() else {
        return Err(ParseError::MissingNumbers {
            found: numbers.len(),
        });
    };

    let coord = Coord::new(to_index(row)?, to_index(col)?);
    debug!(%coord, "Parsed move");
    Ok(coord)
}

fn to_index(digits: &str) -> Result<usize, ParseError> {
    digits.parse().map_err(|_| ParseError::NumberTooLarge {
        digits: digits.to_string(),
    })
}

fn digit_runs(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
}
