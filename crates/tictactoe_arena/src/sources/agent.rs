//! Agent player that asks a text-completion backend for moves.

use super::{MoveSource, Proposal, SourceError, Turn};
use crate::parser::parse_move;
use crate::prompt::{system_prompt, turn_prompt};
use tracing::{debug, info, instrument, warn};

/// Backend that turns a system prompt and a user message into a reply.
///
/// The arena ships no network client; callers plug in their own.
#[async_trait::async_trait]
pub trait Completer: Send + Sync {
    /// Generates a completion.
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String, SourceError>;
}

/// Agent player driven by a [`Completer`].
pub struct AgentSource<C> {
    name: String,
    completer: C,
}

impl<C: Completer> AgentSource<C> {
    /// Creates a new agent source.
    pub fn new(name: impl Into<String>, completer: C) -> Self {
        let name = name.into();
        info!(agent = %name, "Creating agent source");
        Self { name, completer }
    }
}

#[async_trait::async_trait]
impl<C: Completer> MoveSource for AgentSource<C> {
    #[instrument(skip(self, turn), fields(agent = %self.name, mark = %turn.mark, attempt = turn.attempt))]
    async fn propose(&mut self, turn: &Turn) -> Result<Proposal, SourceError> {
        let system = system_prompt(turn.mark);
        let user = turn_prompt(turn);

        debug!("Requesting completion");
        let reply = self.completer.complete(&system, &user).await?;
        let reply = reply.trim();

        match parse_move(reply) {
            Ok(coord) => {
                debug!(%coord, "Agent proposed move");
                Ok(Proposal::new(coord, Some(reply.to_string())))
            }
            Err(e) => {
                warn!(error = %e, reply, "Agent reply had no move");
                Err(SourceError::unparseable(format!("{:?}: {}", reply, e)))
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
