//! Tests for the move sources and config loading.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tictactoe_arena::{
    AgentSource, ArenaConfig, Completer, FirstAvailableSource, HumanSource, InvalidMovePolicy,
    MoveSource, Orchestrator, Outcome, PlayerSpec, ScriptedSource, SourceError, SourceErrorKind,
    Turn, shared_lines,
};
use tictactoe_core::{Coord, GameEngine, Mark};
use tokio::io::BufReader;
use tokio::sync::mpsc;

/// Completer that replays canned replies and records what it was asked.
struct CannedCompleter {
    replies: Mutex<VecDeque<String>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl CannedCompleter {
    fn new(replies: &[&str]) -> (Self, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let completer = Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: prompts.clone(),
        };
        (completer, prompts)
    }
}

#[async_trait::async_trait]
impl Completer for CannedCompleter {
    async fn complete(&self, _system_prompt: &str, user_message: &str) -> Result<String, SourceError> {
        self.prompts.lock().unwrap().push(user_message.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| SourceError::failed("no canned reply"))
    }
}

fn first_turn() -> Turn {
    Turn::new(Mark::X, GameEngine::new().board_snapshot(), 1, None)
}

#[tokio::test]
async fn test_human_skips_blank_lines() {
    let lines = shared_lines(BufReader::new(&b"\n   \n 1, 2 \n"[..]));
    let mut human = HumanSource::new("alice", lines);

    let proposal = human.propose(&first_turn()).await.unwrap();

    assert_eq!(proposal.coord, Coord::new(1, 2));
    assert_eq!(proposal.explanation, None);
    assert_eq!(human.name(), "alice");
}

#[tokio::test]
async fn test_human_garbage_is_unparseable_then_eof_is_exhausted() {
    let lines = shared_lines(BufReader::new(&b"center please\n"[..]));
    let mut human = HumanSource::new("alice", lines);

    let err = human.propose(&first_turn()).await.unwrap_err();
    assert!(matches!(err.kind, SourceErrorKind::Unparseable(_)));
    assert!(err.kind.is_recoverable());

    let err = human.propose(&first_turn()).await.unwrap_err();
    assert!(matches!(err.kind, SourceErrorKind::Exhausted(_)));
    assert!(!err.kind.is_recoverable());
}

#[tokio::test]
async fn test_two_humans_share_one_keyboard() {
    let lines = shared_lines(BufReader::new(&b"0 0\n1 1\n0 1\n2 2\n0 2\n"[..]));
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(
        Box::new(HumanSource::new("alice", lines.clone())),
        Box::new(HumanSource::new("bob", lines)),
        InvalidMovePolicy::default(),
        tx,
    );

    let report = orchestrator.run().await.unwrap();

    assert_eq!(report.outcome, Outcome::Win(Mark::X));
    assert_eq!(report.history.records()[1].mover(), "bob");
}

#[tokio::test]
async fn test_scripted_source_runs_dry() {
    let mut script = ScriptedSource::new("s", [Coord::new(2, 2)]);
    assert_eq!(script.remaining(), 1);

    let proposal = script.propose(&first_turn()).await.unwrap();
    assert_eq!(proposal.coord, Coord::new(2, 2));
    assert_eq!(script.remaining(), 0);

    let err = script.propose(&first_turn()).await.unwrap_err();
    assert!(matches!(err.kind, SourceErrorKind::Exhausted(_)));
}

#[tokio::test]
async fn test_first_available_takes_first_empty_cell() {
    let mut engine = GameEngine::new();
    engine.apply_move(0, 0).unwrap();
    let turn = Turn::new(Mark::O, engine.board_snapshot(), 1, None);

    let mut source = FirstAvailableSource::new("first");
    let proposal = source.propose(&turn).await.unwrap();

    assert_eq!(proposal.coord, Coord::new(0, 1));
}

#[tokio::test]
async fn test_agent_reply_becomes_explanation() {
    let (completer, prompts) = CannedCompleter::new(&["I'll take the center: 1 1"]);
    let mut agent = AgentSource::new("bot", completer);

    let proposal = agent.propose(&first_turn()).await.unwrap();

    assert_eq!(proposal.coord, Coord::new(1, 1));
    assert_eq!(
        proposal.explanation.as_deref(),
        Some("I'll take the center: 1 1")
    );
    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Available valid moves (row, col): [(0, 0),"));
}

#[tokio::test]
async fn test_agent_is_reprompted_with_rejection_reason() {
    // First reply has no numbers, second is occupied, third is fine.
    let (completer, prompts) = CannedCompleter::new(&["pass", "0 0", "2 2"]);
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(
        Box::new(ScriptedSource::new(
            "script",
            [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)],
        )),
        Box::new(AgentSource::new("bot", completer)),
        InvalidMovePolicy::new(3),
        tx,
    );

    // The agent then has no replies left, which ends the match with an error.
    let err = orchestrator.run().await.unwrap_err();
    assert!(err.to_string().contains("Player O (bot) stopped"));

    let history = orchestrator.history();
    assert_eq!(history.len(), 3);
    let agent_move = &history.records()[1];
    assert_eq!(*agent_move.coord(), Coord::new(2, 2));
    assert_eq!(agent_move.explanation().as_deref(), Some("2 2"));

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 4);
    assert!(!prompts[0].contains("rejected"));
    assert!(prompts[1].contains("unparseable reply"));
    assert!(prompts[1].contains("This is attempt 2."));
    assert!(prompts[2].contains("already occupied"));
    assert!(prompts[2].contains("This is attempt 3."));
}

#[tokio::test]
async fn test_agent_that_never_answers_forfeits() {
    let (completer, _prompts) = CannedCompleter::new(&["hmm", "no idea"]);
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(
        Box::new(AgentSource::new("bot", completer)),
        Box::new(FirstAvailableSource::new("first")),
        InvalidMovePolicy::new(2),
        tx,
    );

    let report = orchestrator.run().await.unwrap();

    assert_eq!(report.outcome, Outcome::Forfeit { loser: Mark::X });
    assert!(report.history.is_empty());
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
player_x = "first"
player_o = "script:1,1;2,2"
rounds = 4

[invalid_moves]
max_attempts = 5
"#
    )
    .unwrap();

    let config = ArenaConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.player_x(), PlayerSpec::FirstAvailable);
    assert_eq!(
        *config.player_o(),
        PlayerSpec::Scripted(vec![Coord::new(1, 1), Coord::new(2, 2)])
    );
    assert_eq!(*config.rounds(), 4);
    assert_eq!(*config.invalid_moves().max_attempts(), 5);
    assert!(*config.highlight_last_move());
}

#[test]
fn test_config_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ArenaConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
