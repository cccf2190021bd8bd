//! Arena session: scores and the most recent match, across rounds.

use crate::config::ArenaConfig;
use crate::orchestrator::{GameEvent, MatchReport, Orchestrator, Outcome};
use crate::sources::MoveSource;
use anyhow::Result;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tictactoe_core::Mark;
use tokio::sync::mpsc;
use tracing::{info, instrument};

/// Running tally of match results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Matches credited to X.
    x_wins: u32,
    /// Matches credited to O.
    o_wins: u32,
    /// Drawn matches.
    draws: u32,
}

impl Scoreboard {
    /// Records an outcome. A forfeit counts as a win for the other side.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome.winner() {
            Some(Mark::X) => self.x_wins += 1,
            Some(Mark::O) => self.o_wins += 1,
            None => self.draws += 1,
        }
    }

    /// Matches credited to `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }

    /// Matches recorded in total.
    pub fn played(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

/// One arena session. Each match gets its own engine; the session keeps
/// only scores and the last report.
#[derive(Debug, Getters)]
pub struct ArenaSession {
    /// Settings for every match in the session.
    config: ArenaConfig,
    /// Results so far.
    scoreboard: Scoreboard,
    /// Report of the most recently finished match.
    last_report: Option<MatchReport>,
}

impl ArenaSession {
    /// Creates a session with an empty scoreboard.
    #[instrument(skip(config))]
    pub fn new(config: ArenaConfig) -> Self {
        info!("Creating arena session");
        Self {
            config,
            scoreboard: Scoreboard::default(),
            last_report: None,
        }
    }

    /// Plays one match between the given sources on a fresh engine.
    #[instrument(skip_all, fields(x = %player_x.name(), o = %player_o.name()))]
    pub async fn play_match(
        &mut self,
        player_x: Box<dyn MoveSource>,
        player_o: Box<dyn MoveSource>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Result<&MatchReport> {
        let mut orchestrator =
            Orchestrator::new(player_x, player_o, *self.config.invalid_moves(), event_tx);
        let report = orchestrator.run().await?;

        self.scoreboard.record(report.outcome);
        info!(
            outcome = ?report.outcome,
            x_wins = self.scoreboard.x_wins,
            o_wins = self.scoreboard.o_wins,
            draws = self.scoreboard.draws,
            "Match recorded"
        );
        Ok(self.last_report.insert(report))
    }

    /// Clears scores and the last match.
    pub fn reset(&mut self) {
        info!("Resetting arena session");
        self.scoreboard = Scoreboard::default();
        self.last_report = None;
    }
}
