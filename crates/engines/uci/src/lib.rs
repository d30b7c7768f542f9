//! UCI engine process driver
//!
//! Spawns an external UCI engine (Stockfish or anything else that speaks the
//! protocol) and exposes it as a [`MoveEngine`]. The process lives as long as
//! the [`UciEngine`] value; dropping it sends `quit` and reaps the child, so
//! the engine is released on every exit path.

mod protocol;

pub use protocol::{parse_bestmove, parse_id_name, parse_score, SearchReply};

use chess_core::{EngineError, Move, MoveEngine, Position, Score};
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// How to launch and talk to the engine.
#[derive(Debug, Clone)]
pub struct UciConfig {
    /// Engine executable
    pub path: PathBuf,
    /// Extra command-line arguments
    pub args: Vec<String>,
    /// `setoption` values sent after the handshake
    pub options: BTreeMap<String, String>,
    /// Grace period on top of the requested think time before `stop` is sent
    pub timeout_margin: Duration,
    /// Limit for `uciok` / `readyok`
    pub handshake_timeout: Duration,
}

impl Default for UciConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("stockfish"),
            args: Vec::new(),
            options: BTreeMap::new(),
            timeout_margin: Duration::from_secs(2),
            handshake_timeout: Duration::from_secs(30),
        }
    }
}

/// A running UCI engine process.
pub struct UciEngine {
    child: Child,
    stdin: BufWriter<ChildStdin>,
    rx: Receiver<String>,
    name: String,
    timeout_margin: Duration,
    handshake_timeout: Duration,
}

impl UciEngine {
    /// Start the engine and complete the `uci` / `isready` handshake.
    pub fn spawn(config: &UciConfig) -> Result<Self, EngineError> {
        let mut child = Command::new(&config.path)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                path: config.path.display().to_string(),
                source,
            })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| EngineError::Protocol("no stdin handle".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::Protocol("no stdout handle".to_string()))?;

        // Reader thread so every read can time out.
        let (tx, rx) = mpsc::channel::<String>();
        std::thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                match line {
                    Ok(l) => {
                        if tx.send(l).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        let mut engine = Self {
            child,
            stdin: BufWriter::new(stdin),
            rx,
            name: config.path.display().to_string(),
            timeout_margin: config.timeout_margin,
            handshake_timeout: config.handshake_timeout,
        };
        engine.initialize(&config.options)?;
        debug!(engine = %engine.name, "engine ready");
        Ok(engine)
    }

    fn initialize(&mut self, options: &BTreeMap<String, String>) -> Result<(), EngineError> {
        self.write_line("uci")?;
        loop {
            let line = self.recv_line(self.handshake_timeout)?;
            if let Some(name) = parse_id_name(&line) {
                self.name = name.to_string();
            } else if line == "uciok" {
                break;
            }
        }
        for (name, value) in options {
            self.write_line(&format!("setoption name {name} value {value}"))?;
        }
        self.sync_ready()
    }

    fn sync_ready(&mut self) -> Result<(), EngineError> {
        self.write_line("isready")?;
        loop {
            if self.recv_line(self.handshake_timeout)? == "readyok" {
                return Ok(());
            }
        }
    }

    /// Run `go movetime` on `pos` and collect the reply.
    ///
    /// If the engine overruns the think time by more than the margin, `stop`
    /// is sent and it gets one more margin to answer.
    pub fn go(&mut self, pos: &Position, think_time: Duration) -> Result<SearchReply, EngineError> {
        // Late output from an earlier stopped search.
        while let Ok(stale) = self.rx.try_recv() {
            trace!(engine = %self.name, "discarding {stale}");
        }
        self.write_line(&format!("position fen {}", pos.fen()))?;
        self.write_line(&format!("go movetime {}", think_time.as_millis()))?;

        let start = Instant::now();
        let soft_limit = think_time + self.timeout_margin;
        let hard_limit = soft_limit + self.timeout_margin;
        let mut stop_sent = false;
        let mut reply = SearchReply::default();

        loop {
            let deadline = if stop_sent { hard_limit } else { soft_limit };
            let remaining = deadline.saturating_sub(start.elapsed());
            match self.rx.recv_timeout(remaining) {
                Ok(line) => {
                    trace!(engine = %self.name, "<< {line}");
                    if let Some(score) = parse_score(&line) {
                        reply.score = Some(score);
                    } else if let Some(best_move) = parse_bestmove(&line) {
                        reply.best_move = best_move;
                        return Ok(reply);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    if stop_sent {
                        return Err(EngineError::Timeout(start.elapsed()));
                    }
                    warn!(engine = %self.name, "search overran {:?}, sending stop", think_time);
                    self.write_line("stop")?;
                    stop_sent = true;
                }
                Err(RecvTimeoutError::Disconnected) => return Err(EngineError::Exited),
            }
        }
    }

    fn recv_line(&self, timeout: Duration) -> Result<String, EngineError> {
        match self.rx.recv_timeout(timeout) {
            Ok(line) => {
                trace!(engine = %self.name, "<< {line}");
                Ok(line)
            }
            Err(RecvTimeoutError::Timeout) => Err(EngineError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(EngineError::Exited),
        }
    }

    fn write_line(&mut self, msg: &str) -> Result<(), EngineError> {
        trace!(engine = %self.name, ">> {msg}");
        self.stdin.write_all(msg.as_bytes())?;
        self.stdin.write_all(b"\n")?;
        self.stdin.flush()?;
        Ok(())
    }
}

impl MoveEngine for UciEngine {
    fn best_move(&mut self, pos: &Position, move_time: Duration) -> Result<Move, EngineError> {
        let reply = self.go(pos, move_time)?;
        let text = reply.best_move.ok_or(EngineError::NoMove)?;
        let mv: Move = text
            .parse()
            .map_err(|_| EngineError::IllegalReply(text.clone()))?;
        if !pos.is_legal(mv) {
            return Err(EngineError::IllegalReply(text));
        }
        Ok(mv)
    }

    fn evaluate(&mut self, pos: &Position, think_time: Duration) -> Result<Score, EngineError> {
        self.go(pos, think_time)?
            .score
            .ok_or_else(|| EngineError::Protocol("search finished without a score".to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) -> Result<(), EngineError> {
        self.write_line("ucinewgame")?;
        self.sync_ready()
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        let _ = self.write_line("quit");
        let deadline = Instant::now() + Duration::from_millis(300);
        while Instant::now() < deadline {
            if let Ok(Some(_)) = self.child.try_wait() {
                debug!(engine = %self.name, "engine exited");
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        let _ = self.child.kill();
        let _ = self.child.wait();
        debug!(engine = %self.name, "engine killed");
    }
}
