use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::types::Move;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("expected 4 or 5 characters, got {0}")]
    Length(usize),
    #[error("invalid square in `{0}`")]
    Square(String),
    #[error("invalid promotion piece `{0}`")]
    Promotion(char),
    #[error("source and destination are the same square")]
    NullMove,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid FEN `{fen}`")]
pub struct FenError {
    pub fen: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal move {mv}")]
pub struct IllegalMoveError {
    pub mv: Move,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanError {
    #[error("empty move text")]
    Empty,
    #[error("cannot read `{0}` as algebraic notation")]
    Syntax(String),
    #[error("no legal move matches `{0}`")]
    NoMatch(String),
    #[error("`{0}` matches more than one legal move")]
    Ambiguous(String),
}

/// Failures talking to a move-search engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine `{path}`: {source}")]
    Spawn {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("engine i/o: {0}")]
    Io(#[from] io::Error),
    #[error("engine did not answer within {0:?}")]
    Timeout(Duration),
    #[error("engine process exited")]
    Exited,
    #[error("unexpected engine output: {0}")]
    Protocol(String),
    #[error("engine returned no move")]
    NoMove,
    #[error("engine move `{0}` is not legal in the current position")]
    IllegalReply(String),
}

/// Failures talking to a text-completion model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("API key variable `{0}` is not set")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Http(String),
    #[error("service answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response contained no completion")]
    EmptyResponse,
    #[error("input closed")]
    Closed,
    #[error("i/o: {0}")]
    Io(#[from] io::Error),
}
