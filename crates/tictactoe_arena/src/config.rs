//! Arena configuration: who plays, how many rounds, and how strict to be.
//!
//! Values come from a TOML file, then `ARENA_*` environment variables, then
//! command-line flags, each layer overriding the one before.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tictactoe_core::Coord;
use tracing::{debug, info, instrument};

/// Environment variable overriding the X player spec.
pub const ENV_PLAYER_X: &str = "ARENA_PLAYER_X";
/// Environment variable overriding the O player spec.
pub const ENV_PLAYER_O: &str = "ARENA_PLAYER_O";
/// Environment variable overriding the number of rounds.
pub const ENV_ROUNDS: &str = "ARENA_ROUNDS";

/// Which kind of move source plays a side.
///
/// Written as `human`, `first`, or `script:ROW,COL;ROW,COL;...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlayerSpec {
    /// Moves typed on stdin.
    Human,
    /// First empty cell each turn.
    FirstAvailable,
    /// Fixed list of moves.
    Scripted(Vec<Coord>),
}

impl FromStr for PlayerSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "human" => return Ok(PlayerSpec::Human),
            "first" => return Ok(PlayerSpec::FirstAvailable),
            _ => {}
        }

        let Some(script) = s.strip_prefix("script:") else {
            return Err(ConfigError::new(format!(
                "Unknown player spec {:?} (expected human, first, or script:ROW,COL;...)",
                s
            )));
        };

        script
            .split(';')
            .filter(|step| !step.trim().is_empty())
            .map(parse_step)
            .collect::<Result<Vec<_>, _>>()
            .map(PlayerSpec::Scripted)
    }
}

fn parse_step(step: &str) -> Result<Coord, ConfigError> {
    let (row, col) = step
        .split_once(',')
        .ok_or_else(|| ConfigError::new(format!("Script step {:?} is not ROW,COL", step)))?;
    let parse = |n: &str| {
        n.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::new(format!("Script step {:?}: {}", step, e)))
    };
    Ok(Coord::new(parse(row)?, parse(col)?))
}

impl TryFrom<String> for PlayerSpec {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlayerSpec> for String {
    fn from(spec: PlayerSpec) -> Self {
        spec.to_string()
    }
}

impl std::fmt::Display for PlayerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerSpec::Human => write!(f, "human"),
            PlayerSpec::FirstAvailable => write!(f, "first"),
            PlayerSpec::Scripted(moves) => {
                let steps = moves
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(";");
                write!(f, "script:{}", steps)
            }
        }
    }
}

/// What to do when a source proposes an illegal or unreadable move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct InvalidMovePolicy {
    /// Consecutive rejected attempts allowed before the side forfeits.
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
}

impl InvalidMovePolicy {
    /// Re-prompt up to `max_attempts` times; zero is treated as one.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }
}

impl Default for InvalidMovePolicy {
    fn default() -> Self {
        Self::new(default_max_attempts())
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_player_x() -> PlayerSpec {
    PlayerSpec::Human
}

fn default_player_o() -> PlayerSpec {
    PlayerSpec::FirstAvailable
}

fn default_rounds() -> u32 {
    1
}

fn default_highlight() -> bool {
    true
}

/// Arena configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Source playing X.
    #[serde(default = "default_player_x")]
    player_x: PlayerSpec,

    /// Source playing O.
    #[serde(default = "default_player_o")]
    player_o: PlayerSpec,

    /// Matches to play in one session.
    #[serde(default = "default_rounds")]
    rounds: u32,

    /// Re-prompt policy for rejected moves.
    #[serde(default)]
    invalid_moves: InvalidMovePolicy,

    /// Bracket the last move when drawing the board.
    #[serde(default = "default_highlight")]
    highlight_last_move: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            player_x: default_player_x(),
            player_o: default_player_o(),
            rounds: default_rounds(),
            invalid_moves: InvalidMovePolicy::default(),
            highlight_last_move: default_highlight(),
        }
    }
}

impl ArenaConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(player_x = %config.player_x, player_o = %config.player_o, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Applies `ARENA_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup.
    #[instrument(skip(self, lookup))]
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(spec) = lookup(ENV_PLAYER_X) {
            debug!(%spec, "Overriding player X");
            self.player_x = spec.parse()?;
        }
        if let Some(spec) = lookup(ENV_PLAYER_O) {
            debug!(%spec, "Overriding player O");
            self.player_o = spec.parse()?;
        }
        if let Some(rounds) = lookup(ENV_ROUNDS) {
            self.rounds = rounds.trim().parse().map_err(|e| {
                ConfigError::new(format!("{} must be a number: {}", ENV_ROUNDS, e))
            })?;
        }
        Ok(())
    }

    /// Replaces the X player spec.
    pub fn with_player_x(mut self, spec: PlayerSpec) -> Self {
        self.player_x = spec;
        self
    }

    /// Replaces the O player spec.
    pub fn with_player_o(mut self, spec: PlayerSpec) -> Self {
        self.player_o = spec;
        self
    }

    /// Replaces the number of rounds.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Replaces the invalid-move policy.
    pub fn with_invalid_moves(mut self, policy: InvalidMovePolicy) -> Self {
        self.invalid_moves = policy;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
