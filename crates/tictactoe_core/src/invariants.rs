//! Invariants over engine state.
//!
//! Each invariant is a named property that must hold after every accepted
//! move. They are checked in debug builds and tested on their own.

use crate::engine::GameEngine;
use crate::types::Mark;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together, reporting every violation.
pub trait InvariantSet<S> {
    /// Returns `Ok(())` if all invariants hold, or the list of violations.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        collect(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        collect(violations)
    }
}

/// X is to move exactly when both marks have been placed equally often.
pub struct TurnMatchesMarks;

impl Invariant<GameEngine> for TurnMatchesMarks {
    fn holds(engine: &GameEngine) -> bool {
        let board = engine.board();
        let expected = if board.count(Mark::X) == board.count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        };
        engine.current_turn() == expected
    }

    fn description() -> &'static str {
        "Turn matches the marks on the board (X moves when counts are equal)"
    }
}

/// X leads O by zero or one mark.
pub struct MarkBalance;

impl Invariant<GameEngine> for MarkBalance {
    fn holds(engine: &GameEngine) -> bool {
        let x = engine.board().count(Mark::X);
        let o = engine.board().count(Mark::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X has the same number of marks as O, or one more"
    }
}

/// The last move points at a mark placed by the side not on turn.
pub struct LastMoveConsistent;

impl Invariant<GameEngine> for LastMoveConsistent {
    fn holds(engine: &GameEngine) -> bool {
        match engine.last_move() {
            None => engine.board().filled() == 0,
            Some(coord) => {
                engine.board().get(coord).and_then(|cell| cell.mark())
                    == Some(engine.current_turn().opponent())
            }
        }
    }

    fn description() -> &'static str {
        "Last move holds the mark of the player who just moved"
    }
}

/// Every engine invariant as one composable set.
pub type EngineInvariants = (TurnMatchesMarks, MarkBalance, LastMoveConsistent);
