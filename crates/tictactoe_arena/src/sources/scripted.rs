//! Source that replays a fixed list of moves.

use super::{MoveSource, Proposal, SourceError, Turn};
use std::collections::VecDeque;
use tictactoe_core::Coord;
use tracing::debug;

/// Replays coordinates in order, legal or not.
pub struct ScriptedSource {
    name: String,
    moves: VecDeque<Coord>,
}

impl ScriptedSource {
    /// Creates a scripted source.
    pub fn new(name: impl Into<String>, moves: impl IntoIterator<Item = Coord>) -> Self {
        Self {
            name: name.into(),
            moves: moves.into_iter().collect(),
        }
    }

    /// Moves not yet played.
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

#[async_trait::async_trait]
impl MoveSource for ScriptedSource {
    async fn propose(&mut self, turn: &Turn) -> Result<Proposal, SourceError> {
        let coord = self
            .moves
            .pop_front()
            .ok_or_else(|| SourceError::exhausted(format!("{} has no scripted moves left", self.name)))?;
        debug!(source = %self.name, mark = %turn.mark, %coord, "Scripted move");
        Ok(Proposal::new(coord, None))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
