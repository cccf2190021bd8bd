//! Source that takes the first empty cell.

use super::{MoveSource, Proposal, SourceError, Turn};
use tracing::debug;

/// Picks the first entry of the valid-move list.
pub struct FirstAvailableSource {
    name: String,
}

impl FirstAvailableSource {
    /// Creates a new first-available source.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait::async_trait]
impl MoveSource for FirstAvailableSource {
    async fn propose(&mut self, turn: &Turn) -> Result<Proposal, SourceError> {
        let coord = turn
            .valid_moves()
            .first()
            .copied()
            .ok_or_else(|| SourceError::exhausted("No valid moves available"))?;
        debug!(source = %self.name, %coord, "Chose first available cell");
        Ok(Proposal::new(coord, Some("first available cell".to_string())))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
