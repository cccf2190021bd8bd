//! Tic-tac-toe arena - terminal front end.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use tictactoe_arena::{
    ArenaConfig, ArenaSession, FirstAvailableSource, GameEvent, HumanSource, MoveSource,
    PlayerSpec, ScriptedSource, SharedLines, prompt, render, shared_lines,
};
use tictactoe_core::Mark;
use tokio::io::{BufReader, Stdin};
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            config,
            x,
            o,
            rounds,
        } => run_play(&config, x, o, rounds).await,
        Command::Rules => {
            for mark in [Mark::X, Mark::O] {
                println!("{}\n", prompt::system_prompt(mark));
            }
            Ok(())
        }
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tictactoe_arena=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[instrument(skip(x, o, rounds))]
fn load_config(
    path: &Path,
    x: Option<PlayerSpec>,
    o: Option<PlayerSpec>,
    rounds: Option<u32>,
) -> Result<ArenaConfig> {
    let mut config = if path.exists() {
        ArenaConfig::from_file(path)?
    } else {
        info!("Config file not found at {}, using defaults", path.display());
        ArenaConfig::default()
    };

    config.apply_env()?;

    if let Some(spec) = x {
        config = config.with_player_x(spec);
    }
    if let Some(spec) = o {
        config = config.with_player_o(spec);
    }
    if let Some(rounds) = rounds {
        config = config.with_rounds(rounds);
    }
    Ok(config)
}

fn build_source(
    spec: &PlayerSpec,
    mark: Mark,
    stdin: &SharedLines<BufReader<Stdin>>,
) -> Box<dyn MoveSource> {
    let name = format!("{} {}", spec_label(spec), mark);
    match spec {
        PlayerSpec::Human => Box::new(HumanSource::new(name, stdin.clone())),
        PlayerSpec::FirstAvailable => Box::new(FirstAvailableSource::new(name)),
        PlayerSpec::Scripted(moves) => Box::new(ScriptedSource::new(name, moves.iter().copied())),
    }
}

fn spec_label(spec: &PlayerSpec) -> &'static str {
    match spec {
        PlayerSpec::Human => "Human",
        PlayerSpec::FirstAvailable => "FirstAvailable",
        PlayerSpec::Scripted(_) => "Script",
    }
}

async fn run_play(
    path: &Path,
    x: Option<PlayerSpec>,
    o: Option<PlayerSpec>,
    rounds: Option<u32>,
) -> Result<()> {
    let config = load_config(path, x, o, rounds)?;
    let highlight = *config.highlight_last_move();
    let rounds = *config.rounds();
    let stdin = shared_lines(BufReader::new(tokio::io::stdin()));

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<GameEvent>();
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            print!("{}", render::event(&event, highlight));
        }
    });

    info!(rounds, x = %config.player_x(), o = %config.player_o(), "Starting arena");
    let mut session = ArenaSession::new(config.clone());

    for round in 1..=rounds {
        println!("=== Round {} of {} ===", round, rounds);
        let player_x = build_source(config.player_x(), Mark::X, &stdin);
        let player_o = build_source(config.player_o(), Mark::O, &stdin);

        let report = session
            .play_match(player_x, player_o, event_tx.clone())
            .await
            .with_context(|| format!("Round {} did not finish", round))?;

        // Let the printer catch up before the summary.
        tokio::task::yield_now().await;
        println!("{}", render::outcome(report));
        println!("Move history:\n{}", render::history(&report.history));
        println!("{}\n", render::scoreboard(session.scoreboard()));
    }

    drop(event_tx);
    printer.await.context("Event printer failed")?;
    Ok(())
}
