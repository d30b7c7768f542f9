//! Parsing of the engine-to-GUI half of the UCI protocol.

use chess_core::Score;

/// What came back from one `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchReply {
    /// Move text from the `bestmove` line, `None` for `(none)` / `0000`
    pub best_move: Option<String>,
    /// Last score seen in an `info` line before `bestmove`
    pub score: Option<Score>,
}

/// `bestmove e2e4 ponder e7e5` -> `Some(Some("e2e4"))`.
///
/// Returns `None` when the line is not a `bestmove` line at all.
pub fn parse_bestmove(line: &str) -> Option<Option<String>> {
    let mut parts = line.split_whitespace();
    if parts.next()? != "bestmove" {
        return None;
    }
    match parts.next() {
        None | Some("(none)") | Some("0000") => Some(None),
        Some(mv) => Some(Some(mv.to_string())),
    }
}

/// Score from an `info` line, if it carries one.
pub fn parse_score(line: &str) -> Option<Score> {
    let mut parts = line.split_whitespace();
    if parts.next()? != "info" {
        return None;
    }
    while let Some(token) = parts.next() {
        if token != "score" {
            continue;
        }
        let kind = parts.next()?;
        let value: i32 = parts.next()?.parse().ok()?;
        return match kind {
            "cp" => Some(Score::Centipawns(value)),
            "mate" => Some(Score::Mate(value)),
            _ => None,
        };
    }
    None
}

/// `id name Stockfish 16` -> `Some("Stockfish 16")`.
pub fn parse_id_name(line: &str) -> Option<&str> {
    line.strip_prefix("id name ").map(str::trim)
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
