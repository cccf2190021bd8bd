//! Move history kept by the orchestration layer.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tictactoe_core::{Coord, Mark};

/// One accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct MoveRecord {
    /// Display name of the source that moved.
    mover: String,
    /// Mark that was placed.
    mark: Mark,
    /// Where it was placed.
    coord: Coord,
    /// Reasoning that came with the move, if any.
    explanation: Option<String>,
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {} ({}) -> {}", self.mark, self.mover, self.coord)
    }
}

/// Accepted moves of one match, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
}

impl MoveHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an accepted move.
    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    /// Number of accepted moves.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no move was accepted yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forgets every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
