//! Human player that types moves as text lines.

use super::{MoveSource, Proposal, SourceError, Turn};
use crate::parser::parse_move;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Line reader shared by every human at the same keyboard.
pub type SharedLines<R> = Arc<Mutex<Lines<R>>>;

/// Wraps a reader so several human sources can take turns on it.
pub fn shared_lines<R: AsyncBufRead + Unpin>(reader: R) -> SharedLines<R> {
    Arc::new(Mutex::new(reader.lines()))
}

/// Human player reading `row col` lines.
pub struct HumanSource<R> {
    name: String,
    lines: SharedLines<R>,
}

impl<R> HumanSource<R> {
    /// Creates a human source over shared input.
    pub fn new(name: impl Into<String>, lines: SharedLines<R>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }
}

#[async_trait::async_trait]
impl<R> MoveSource for HumanSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn propose(&mut self, turn: &Turn) -> Result<Proposal, SourceError> {
        debug!(player = %self.name, mark = %turn.mark, "Waiting for typed move");
        let mut lines = self.lines.lock().await;

        loop {
            let line = lines.next_line().await.map_err(|e| {
                warn!(player = %self.name, error = %e, "Failed to read input");
                SourceError::failed(format!("Failed to read input: {}", e))
            })?;

            let Some(line) = line else {
                return Err(SourceError::exhausted("Input closed"));
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            return parse_move(line)
                .map(|coord| Proposal::new(coord, None))
                .map_err(|e| SourceError::unparseable(format!("{:?}: {}", line, e)));
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
