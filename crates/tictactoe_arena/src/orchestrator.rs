//! Game orchestration between two move sources.

use crate::config::InvalidMovePolicy;
use crate::history::{MoveHistory, MoveRecord};
use crate::sources::{MoveSource, Turn};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tictactoe_core::{BoardSnapshot, GameEngine, GameStatus, Mark};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A line of three was completed.
    Win(Mark),
    /// Full board, no line.
    Draw,
    /// A side ran out of attempts and lost the match.
    Forfeit {
        /// Side that gave up the match.
        loser: Mark,
    },
}

impl Outcome {
    /// Mark credited with the match, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(mark),
            Outcome::Forfeit { loser } => Some(loser.opponent()),
            Outcome::Draw => None,
        }
    }

    fn from_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::InProgress => None,
            GameStatus::Win(mark) => Some(Outcome::Win(mark)),
            GameStatus::Draw => Some(Outcome::Draw),
        }
    }
}

/// Messages sent from orchestrator to observers.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A source is being asked for a move.
    TurnStarted {
        /// Mark to move.
        mark: Mark,
        /// Name of the source asked.
        player: String,
        /// Board shown to the source.
        snapshot: BoardSnapshot,
        /// Attempt number for this turn.
        attempt: u32,
    },
    /// Move was applied.
    MoveAccepted(MoveRecord),
    /// Proposal was unreadable or illegal.
    MoveRejected {
        /// Mark that tried to move.
        mark: Mark,
        /// Name of the source.
        player: String,
        /// Why it was rejected.
        reason: String,
        /// Attempt number that failed.
        attempt: u32,
    },
    /// Match ended.
    GameOver {
        /// How it ended.
        outcome: Outcome,
        /// Final board.
        snapshot: BoardSnapshot,
    },
}

/// Result of one finished match.
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// How the match ended.
    pub outcome: Outcome,
    /// Accepted moves in order.
    pub history: MoveHistory,
    /// Board at the end.
    pub final_snapshot: BoardSnapshot,
    /// Display names of the X and O sources.
    pub players: [String; 2],
}

impl MatchReport {
    /// Name of the source that played `mark`.
    pub fn player(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.players[0],
            Mark::O => &self.players[1],
        }
    }
}

/// Orchestrates gameplay between two sources over one engine.
pub struct Orchestrator {
    engine: GameEngine,
    player_x: Box<dyn MoveSource>,
    player_o: Box<dyn MoveSource>,
    policy: InvalidMovePolicy,
    history: MoveHistory,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator with a fresh engine.
    pub fn new(
        player_x: Box<dyn MoveSource>,
        player_o: Box<dyn MoveSource>,
        policy: InvalidMovePolicy,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            engine: GameEngine::new(),
            player_x,
            player_o,
            policy,
            history: MoveHistory::new(),
            event_tx,
        }
    }

    /// Current engine, read-only.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Moves accepted so far.
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Runs the game loop until a win, a draw or a forfeit.
    ///
    /// # Errors
    ///
    /// Fails when a source is exhausted or breaks; rejected and unparseable
    /// moves are handled by the policy instead.
    #[instrument(skip(self), fields(x = %self.player_x.name(), o = %self.player_o.name()))]
    pub async fn run(&mut self) -> Result<MatchReport> {
        info!("Starting game orchestration");
        let max_attempts = (*self.policy.max_attempts()).max(1);
        let mut attempt = 1;
        let mut previous_error: Option<String> = None;

        loop {
            if let Some(outcome) = Outcome::from_status(self.engine.status()) {
                return Ok(self.finish(outcome));
            }

            let mark = self.engine.current_turn();
            let turn = Turn::new(mark, self.engine.board_snapshot(), attempt, previous_error.take());
            let player = self.name_of(mark).to_string();

            self.emit(GameEvent::TurnStarted {
                mark,
                player: player.clone(),
                snapshot: turn.snapshot.clone(),
                attempt,
            });

            debug!(player = %player, %mark, attempt, "Waiting for move");
            let source = match mark {
                Mark::X => &mut self.player_x,
                Mark::O => &mut self.player_o,
            };
            let proposal = source.propose(&turn).await;

            let reason = match proposal {
                Ok(proposal) => match self.engine.apply_move(proposal.coord.row, proposal.coord.col) {
                    Ok(()) => {
                        let record = MoveRecord::new(player, mark, proposal.coord, proposal.explanation);
                        info!(%record, "Move accepted");
                        self.history.push(record.clone());
                        self.emit(GameEvent::MoveAccepted(record));
                        attempt = 1;
                        continue;
                    }
                    Err(e) => e.to_string(),
                },
                Err(e) if e.kind.is_recoverable() => e.kind.to_string(),
                Err(e) => {
                    return Err(e).with_context(|| format!("Player {} ({}) stopped", mark, player));
                }
            };

            warn!(player = %player, %mark, attempt, reason = %reason, "Move rejected");
            self.emit(GameEvent::MoveRejected {
                mark,
                player: player.clone(),
                reason: reason.clone(),
                attempt,
            });

            if attempt >= max_attempts {
                warn!(player = %player, %mark, "Out of attempts, forfeiting");
                return Ok(self.finish(Outcome::Forfeit { loser: mark }));
            }
            attempt += 1;
            previous_error = Some(reason);
        }
    }

    /// Restarts the game with a fresh engine and empty history.
    pub fn restart(&mut self) {
        info!("Restarting game");
        self.engine = GameEngine::new();
        self.history.clear();
    }

    fn name_of(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => self.player_x.name(),
            Mark::O => self.player_o.name(),
        }
    }

    fn finish(&self, outcome: Outcome) -> MatchReport {
        let final_snapshot = self.engine.board_snapshot();
        info!(?outcome, moves = self.history.len(), "Game over");
        self.emit(GameEvent::GameOver {
            outcome,
            snapshot: final_snapshot.clone(),
        });
        MatchReport {
            outcome,
            history: self.history.clone(),
            final_snapshot,
            players: [self.player_x.name().to_string(), self.player_o.name().to_string()],
        }
    }

    fn emit(&self, event: GameEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("No event listener, dropping event");
        }
    }
}
