//! Drives `UciEngine` against a tiny shell-script engine.

#![cfg(unix)]

use chess_core::{EngineError, MoveEngine, Position, Score};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use uci_engine::{UciConfig, UciEngine};

const FAKE_ENGINE: &str = r#"
while read -r line; do
  case "$line" in
    uci) echo "id name FakeFish 1.0"; echo "option name Threads type spin default 1 min 1 max 8"; echo "uciok" ;;
    isready) echo "readyok" ;;
    "position fen 8/8/8/8/8/8/8/k6K w - - 0 1") mode=none ;;
    position*) mode=normal ;;
    go*)
      if [ "$mode" = "none" ]; then
        echo "bestmove (none)"
      else
        echo "info depth 1 score cp 17 pv e2e4"
        echo "info depth 2 score cp 23 pv e2e4 e7e5"
        echo "bestmove e2e4 ponder e7e5"
      fi ;;
    quit) exit 0 ;;
  esac
done
"#;

/// Handshakes normally, then runs `on_go` and `on_stop` for those commands.
fn misbehaving_engine(on_go: &str, on_stop: &str) -> String {
    format!(
        r#"
while read -r line; do
  case "$line" in
    uci) echo "id name SlowFish"; echo "uciok" ;;
    isready) echo "readyok" ;;
    go*) {on_go} ;;
    stop) {on_stop} ;;
    quit) exit 0 ;;
  esac
done
"#
    )
}

const SHORT_MARGIN: Duration = Duration::from_millis(200);

fn write_script(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{}-{}.sh", name, std::process::id()));
    std::fs::write(&path, body).unwrap();
    path
}

fn spawn_script(name: &str, body: &str, timeout_margin: Duration) -> UciEngine {
    let script = write_script(name, body);
    let config = UciConfig {
        path: PathBuf::from("sh"),
        args: vec![script.display().to_string()],
        options: [("Threads".to_string(), "1".to_string())].into_iter().collect(),
        timeout_margin,
        handshake_timeout: Duration::from_secs(5),
    };
    UciEngine::spawn(&config).unwrap()
}

fn spawn_fake(name: &str) -> UciEngine {
    spawn_script(name, FAKE_ENGINE, Duration::from_secs(5))
}

#[test]
fn handshake_reads_engine_name() {
    let engine = spawn_fake("uci-name");
    assert_eq!(engine.name(), "FakeFish 1.0");
}

#[test]
fn best_move_and_evaluation() {
    let mut engine = spawn_fake("uci-search");
    engine.new_game().unwrap();

    let pos = Position::startpos();
    let mv = engine.best_move(&pos, Duration::from_millis(10)).unwrap();
    assert_eq!(mv.to_string(), "e2e4");

    let score = engine.evaluate(&pos, Duration::from_millis(10)).unwrap();
    assert_eq!(score, Score::Centipawns(23));
}

#[test]
fn no_move_is_an_error() {
    let mut engine = spawn_fake("uci-none");
    let pos = Position::from_fen("8/8/8/8/8/8/8/k6K w - - 0 1").unwrap();

    let err = engine.best_move(&pos, Duration::from_millis(10)).unwrap_err();
    assert!(matches!(err, EngineError::NoMove));
}

#[test]
fn illegal_reply_is_an_error() {
    let mut engine = spawn_fake("uci-illegal");
    // e2e4 is not a legal move for Black.
    let pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
        .unwrap();

    let err = engine.best_move(&pos, Duration::from_millis(10)).unwrap_err();
    assert!(matches!(err, EngineError::IllegalReply(text) if text == "e2e4"));
}

#[test]
fn silent_search_times_out_after_stop() {
    let body = misbehaving_engine(":", ":");
    let mut engine = spawn_script("uci-silent", &body, SHORT_MARGIN);

    let start = Instant::now();
    let err = engine
        .best_move(&Position::startpos(), Duration::from_millis(10))
        .unwrap_err();
    assert!(matches!(err, EngineError::Timeout(_)), "got {err:?}");
    // think time plus one margin before stop, one more after it
    assert!(start.elapsed() < Duration::from_secs(3));

    // The process is still alive and answers isready.
    engine.new_game().unwrap();
}

#[test]
fn stop_collects_the_best_move() {
    let body = misbehaving_engine(":", r#"echo "bestmove e2e4""#);
    let mut engine = spawn_script("uci-stop", &body, SHORT_MARGIN);

    let mv = engine
        .best_move(&Position::startpos(), Duration::from_millis(10))
        .unwrap();
    assert_eq!(mv.to_string(), "e2e4");
}

#[test]
fn late_best_move_does_not_leak_into_the_next_game() {
    let body = misbehaving_engine(r#"sleep 1; echo "bestmove e2e4""#, ":");
    let mut engine = spawn_script("uci-late", &body, SHORT_MARGIN);

    let err = engine
        .best_move(&Position::startpos(), Duration::from_millis(10))
        .unwrap_err();
    assert!(matches!(err, EngineError::Timeout(_)), "got {err:?}");

    // The stale bestmove arrives before readyok and is skipped.
    engine.new_game().unwrap();
}

#[test]
fn engine_exiting_mid_search_is_reported() {
    let body = misbehaving_engine("exit 1", ":");
    let mut engine = spawn_script("uci-crash", &body, SHORT_MARGIN);

    let err = engine
        .best_move(&Position::startpos(), Duration::from_millis(10))
        .unwrap_err();
    assert!(matches!(err, EngineError::Exited), "got {err:?}");

    let err = engine.new_game().unwrap_err();
    assert!(
        matches!(err, EngineError::Exited | EngineError::Io(_)),
        "got {err:?}"
    );
}

#[test]
fn missing_binary_fails_to_spawn() {
    let config = UciConfig {
        path: PathBuf::from("/definitely/not/an/engine"),
        ..Default::default()
    };
    assert!(matches!(
        UciEngine::spawn(&config),
        Err(EngineError::Spawn { .. })
    ));
}
