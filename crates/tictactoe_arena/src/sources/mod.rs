//! Move sources and their shared contract.
//!
//! A move source proposes a coordinate for one mark. The engine re-validates
//! every proposal, so sources are free to be wrong.

mod agent;
mod first_available;
mod human;
mod scripted;

pub use agent::{AgentSource, Completer};
pub use first_available::FirstAvailableSource;
pub use human::{HumanSource, SharedLines, shared_lines};
pub use scripted::ScriptedSource;

use derive_more::{Display, Error};
use derive_new::new;
use tictactoe_core::{BoardSnapshot, Coord, Mark};
use tracing::instrument;

/// Everything a source is shown when asked for a move.
#[derive(Debug, Clone, new)]
pub struct Turn {
    /// Mark the source plays.
    pub mark: Mark,
    /// Board at the time of asking.
    pub snapshot: BoardSnapshot,
    /// Attempt number for this turn, starting at 1.
    pub attempt: u32,
    /// Why the previous attempt of this turn was rejected.
    pub previous_error: Option<String>,
}

impl Turn {
    /// Empty cells the source should choose from.
    pub fn valid_moves(&self) -> &[Coord] {
        &self.snapshot.valid_moves
    }
}

/// A proposed move plus the reasoning that came with it.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Proposal {
    /// Proposed cell.
    pub coord: Coord,
    /// Free-text explanation, if the source gave one.
    pub explanation: Option<String>,
}

/// Trait for anything that can propose moves.
#[async_trait::async_trait]
pub trait MoveSource: Send {
    /// Proposes a move for the given turn.
    async fn propose(&mut self, turn: &Turn) -> Result<Proposal, SourceError>;

    /// Returns the source's display name.
    fn name(&self) -> &str;
}

/// What went wrong while asking a source for a move.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SourceErrorKind {
    /// Reply could not be read as two integers.
    #[display("unparseable reply: {}", _0)]
    Unparseable(String),
    /// Source has no more moves to give (script ran out, input closed).
    #[display("source exhausted: {}", _0)]
    Exhausted(String),
    /// Source failed outright.
    #[display("source failed: {}", _0)]
    Failed(String),
}

impl SourceErrorKind {
    /// Unparseable replies count as a rejected attempt; the rest end the match.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SourceErrorKind::Unparseable(_))
    }
}

/// Move source error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Move source error: {} at {}:{}", kind, file, line)]
pub struct SourceError {
    /// What went wrong.
    pub kind: SourceErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SourceError {
    /// Creates a new source error.
    #[track_caller]
    #[instrument(skip(kind))]
    pub fn new(kind: SourceErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for [`SourceErrorKind::Unparseable`].
    #[track_caller]
    pub fn unparseable(reply: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Unparseable(reply.into()))
    }

    /// Shorthand for [`SourceErrorKind::Exhausted`].
    #[track_caller]
    pub fn exhausted(reason: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Exhausted(reason.into()))
    }

    /// Shorthand for [`SourceErrorKind::Failed`].
    #[track_caller]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Failed(reason.into()))
    }
}
