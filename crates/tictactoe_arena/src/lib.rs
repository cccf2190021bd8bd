//! Tic-tac-toe arena: match orchestration between two move sources.
//!
//! # Architecture
//!
//! - **Sources**: anything that proposes moves (keyboard, script, agent)
//! - **Parser**: pulls `(row, col)` out of free-form replies
//! - **Orchestrator**: alternates sources over one engine, applies the
//!   re-prompt policy, records history and emits events
//! - **Session**: scores across matches, a fresh engine per match
//!
//! The rules themselves live in `tictactoe_core`.
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_arena::{ArenaConfig, ArenaSession, FirstAvailableSource, ScriptedSource};
//! use tictactoe_core::Coord;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let (event_tx, _event_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut session = ArenaSession::new(ArenaConfig::default());
//! let report = session
//!     .play_match(
//!         Box::new(ScriptedSource::new("script", [Coord::new(1, 1)])),
//!         Box::new(FirstAvailableSource::new("first")),
//!         event_tx,
//!     )
//!     .await?;
//! println!("{:?}", report.outcome);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod history;
mod orchestrator;
mod parser;
mod session;
mod sources;

pub mod prompt;
pub mod render;

pub use config::{ArenaConfig, ConfigError, InvalidMovePolicy, PlayerSpec};
pub use history::{MoveHistory, MoveRecord};
pub use orchestrator::{GameEvent, MatchReport, Orchestrator, Outcome};
pub use parser::{ParseError, parse_move};
pub use session::{ArenaSession, Scoreboard};
pub use sources::{
    AgentSource, Completer, FirstAvailableSource, HumanSource, MoveSource, Proposal,
    ScriptedSource, SharedLines, SourceError, SourceErrorKind, Turn, shared_lines,
};
