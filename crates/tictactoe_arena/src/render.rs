//! Stateless text rendering for the terminal.

use crate::history::MoveHistory;
use crate::orchestrator::{GameEvent, MatchReport, Outcome};
use crate::prompt::format_moves;
use crate::session::Scoreboard;
use tictactoe_core::{BoardSnapshot, Coord, Mark};

/// Draws the board with row and column indices.
///
/// With `highlight` set, the last move is shown in brackets.
pub fn board(snapshot: &BoardSnapshot, highlight: bool) -> String {
    let mut out = String::from("    0   1   2\n");
    for (row, cells) in snapshot.rows.iter().enumerate() {
        if row > 0 {
            out.push_str("   ---+---+---\n");
        }
        let line = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let symbol = cell.symbol();
                if highlight && snapshot.last_move == Some(Coord::new(row, col)) {
                    format!("[{}]", symbol)
                } else {
                    format!(" {} ", symbol)
                }
            })
            .collect::<Vec<_>>()
            .join("|");
        out.push_str(&format!("{}  {}\n", row, line));
    }
    out
}

/// Lists accepted moves with their explanations.
pub fn history(history: &MoveHistory) -> String {
    if history.is_empty() {
        return "No moves yet.\n".to_string();
    }
    history
        .records()
        .iter()
        .enumerate()
        .map(|(idx, record)| match record.explanation() {
            Some(why) => format!("{:>2}. {}\n    {}\n", idx + 1, record, why),
            None => format!("{:>2}. {}\n", idx + 1, record),
        })
        .collect()
}

/// One-line scoreboard.
pub fn scoreboard(scores: &Scoreboard) -> String {
    format!(
        "Scoreboard: X {} | O {} | draws {}",
        scores.wins(Mark::X),
        scores.wins(Mark::O),
        scores.draws()
    )
}

/// Banner announcing how a match ended.
pub fn outcome(report: &MatchReport) -> String {
    match report.outcome {
        Outcome::Win(mark) => format!("Game Over! {} ({}) wins!", report.player(mark), mark),
        Outcome::Draw => "Game Over! It's a draw!".to_string(),
        Outcome::Forfeit { loser } => format!(
            "Game Over! {} ({}) forfeits, {} ({}) wins!",
            report.player(loser),
            loser,
            report.player(loser.opponent()),
            loser.opponent()
        ),
    }
}

/// Text for a live game event.
pub fn event(event: &GameEvent, highlight: bool) -> String {
    match event {
        GameEvent::TurnStarted {
            mark,
            player,
            snapshot,
            attempt,
        } => {
            let retry = if *attempt > 1 {
                format!(" (attempt {})", attempt)
            } else {
                String::new()
            };
            format!(
                "{}\nPlayer {} ({}) to move{}. Valid moves: {}\n",
                board(snapshot, highlight),
                mark,
                player,
                retry,
                format_moves(&snapshot.valid_moves)
            )
        }
        GameEvent::MoveAccepted(record) => format!("{}\n", record),
        GameEvent::MoveRejected {
            mark,
            player,
            reason,
            ..
        } => format!("Player {} ({}) move rejected: {}\n", mark, player, reason),
        GameEvent::GameOver { snapshot, .. } => board(snapshot, highlight),
    }
}
