//! Prompt text shown to language-model move sources.

use crate::sources::Turn;
use tictactoe_core::{Coord, Mark};

/// System prompt describing the board, rules and reply format for `mark`.
pub fn system_prompt(mark: Mark) -> String {
    format!(
        "You are Player {mark} in a Tic Tac Toe game. Your goal is to win by placing three {mark}'s in a row.\n\
         \n\
         BOARD LAYOUT:\n\
         - The board is a 3x3 grid with coordinates from (0,0) to (2,2)\n\
         - Top-left is (0,0), bottom-right is (2,2)\n\
         \n\
         RULES:\n\
         - You can only place {mark} in empty spaces (shown as \" \" on the board)\n\
         - Players take turns placing their marks\n\
         - First to get 3 marks in a row (horizontal, vertical, or diagonal) wins\n\
         - If all spaces are filled with no winner, the game is a draw\n\
         \n\
         YOUR RESPONSE:\n\
         - Provide ONLY two numbers separated by a space (row column)\n\
         - Example: \"1 2\" places your {mark} in row 1, column 2\n\
         - Choose only from the valid moves list provided to you\n\
         \n\
         STRATEGY TIPS:\n\
         - Block your opponent's potential winning moves\n\
         - Create opportunities for multiple winning paths"
    )
}

/// Formats coordinates as `[(0, 0), (1, 2)]`.
pub fn format_moves(moves: &[Coord]) -> String {
    let items = moves
        .iter()
        .map(|c| format!("({}, {})", c.row, c.col))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", items)
}

/// User message for one turn: board, valid moves and the reply format.
pub fn turn_prompt(turn: &Turn) -> String {
    let mut prompt = format!(
        "Current board state:\n{}\n\n\
         Available valid moves (row, col): {}\n\n\
         Choose your next move from the valid moves above.\n\
         Respond with ONLY two numbers for row and column, e.g. \"1 2\".",
        turn.snapshot,
        format_moves(turn.valid_moves()),
    );
    if let Some(error) = &turn.previous_error {
        prompt.push_str(&format!(
            "\n\nYour previous answer was rejected ({}). This is attempt {}.",
            error, turn.attempt
        ));
    }
    prompt
}
