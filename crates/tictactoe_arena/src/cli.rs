//! Command-line interface for tictactoe_arena.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_arena::PlayerSpec;

/// Tic-tac-toe arena - pit two move sources against each other
#[derive(Parser, Debug)]
#[command(name = "tictactoe_arena")]
#[command(about = "Turn-based tic-tac-toe between humans, scripts and agents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one or more matches in the terminal
    Play {
        /// Path to arena config file
        #[arg(short, long, default_value = "arena.toml")]
        config: PathBuf,

        /// Source for X: human, first, or script:ROW,COL;...
        #[arg(long)]
        x: Option<PlayerSpec>,

        /// Source for O: human, first, or script:ROW,COL;...
        #[arg(long)]
        o: Option<PlayerSpec>,

        /// Number of matches to play
        #[arg(short, long)]
        rounds: Option<u32>,
    },

    /// Print the rules prompt given to agents
    Rules,
}
