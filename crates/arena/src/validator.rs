//! Validation of untrusted move text

use chess_core::{FailureKind, Move, Position, SanError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a reply could not be played.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMove {
    #[error("`{text}` is not a valid move: {reason}")]
    Malformed { text: String, reason: String },
    #[error("`{text}` is illegal in the current position")]
    Illegal { text: String },
}

impl InvalidMove {
    pub fn kind(&self) -> FailureKind {
        match self {
            InvalidMove::Malformed { .. } => FailureKind::Malformed,
            InvalidMove::Illegal { .. } => FailureKind::Illegal,
        }
    }
}

/// Which notations a move source may answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// Coordinate notation only (`e7e5`, `e2e1q`)
    #[default]
    Uci,
    /// SAN first, coordinate notation as a fallback
    Human,
}

/// Strict UCI validation for model replies.
///
/// The text is trimmed and must then be exactly a coordinate move that is
/// legal in `position`.
pub fn validate(position: &Position, raw: &str) -> Result<Move, InvalidMove> {
    let text = raw.trim();
    let mv: Move = text.parse().map_err(|e| InvalidMove::Malformed {
        text: text.to_string(),
        reason: format!("{e}"),
    })?;
    if !position.is_legal(mv) {
        return Err(InvalidMove::Illegal {
            text: text.to_string(),
        });
    }
    Ok(mv)
}

/// Validation for moves typed by a person: SAN, falling back to UCI.
pub fn validate_human(position: &Position, raw: &str) -> Result<Move, InvalidMove> {
    let text = raw.trim();
    let san_error = match position.parse_san(text) {
        Ok(mv) => return Ok(mv),
        Err(e) => e,
    };
    match validate(position, text) {
        Ok(mv) => Ok(mv),
        Err(InvalidMove::Malformed { .. }) => match san_error {
            // Readable as SAN, just not playable here.
            SanError::NoMatch(_) | SanError::Ambiguous(_) => Err(InvalidMove::Illegal {
                text: text.to_string(),
            }),
            SanError::Empty | SanError::Syntax(_) => Err(InvalidMove::Malformed {
                text: text.to_string(),
                reason: san_error.to_string(),
            }),
        },
        Err(illegal) => Err(illegal),
    }
}

/// Dispatch on the notation a side is allowed to use.
pub fn validate_as(notation: Notation, position: &Position, raw: &str) -> Result<Move, InvalidMove> {
    match notation {
        Notation::Uci => validate(position, raw),
        Notation::Human => validate_human(position, raw),
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod validator_tests;
