use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use cozy_chess::{Color, File, Piece, Rank, Square};

use crate::error::MoveParseError;

/// A move in standard UCI convention.
///
/// Castling is written as the king moving two squares (`e1g1`), never as the
/// king-takes-rook encoding the board library uses internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, piece: Piece) -> Self {
        Self {
            from,
            to,
            promotion: Some(piece),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.from), square_name(self.to))?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece_char(piece))?;
        }
        Ok(())
    }
}

/// Strict UCI parsing: exactly `<from><to>[promotion]`, lowercase only.
impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 && chars.len() != 5 {
            return Err(MoveParseError::Length(chars.len()));
        }
        let square_error = || MoveParseError::Square(s.to_string());
        if !chars[..4].iter().all(char::is_ascii) {
            return Err(square_error());
        }
        // The first four characters are ASCII, so bytes and chars line up.
        let bytes = s.as_bytes();
        let from = parse_square(&bytes[0..2]).ok_or_else(square_error)?;
        let to = parse_square(&bytes[2..4]).ok_or_else(square_error)?;
        if from == to {
            return Err(MoveParseError::NullMove);
        }
        let promotion = match chars.get(4) {
            None => None,
            Some(&c) => Some(promotion_piece(c).ok_or(MoveParseError::Promotion(c))?),
        };
        Ok(Self { from, to, promotion })
    }
}

/// Final score of a game, White's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWin,
    BlackWin,
    Draw,
    Undetermined,
}

impl GameResult {
    /// PGN-style result string.
    pub fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWin => "1-0",
            GameResult::BlackWin => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Undetermined => "*",
        }
    }

}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a move text failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Text does not parse as a move at all.
    Malformed,
    /// Parses, but is not legal in the position.
    Illegal,
}

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    Repetition,
    InvalidMove(FailureKind),
    EngineFailure,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Checkmate => f.write_str("checkmate"),
            Termination::Stalemate => f.write_str("stalemate"),
            Termination::InsufficientMaterial => f.write_str("insufficient material"),
            Termination::FiftyMoveRule => f.write_str("fifty-move rule"),
            Termination::Repetition => f.write_str("threefold repetition"),
            Termination::InvalidMove(FailureKind::Malformed) => f.write_str("malformed move"),
            Termination::InvalidMove(FailureKind::Illegal) => f.write_str("illegal move"),
            Termination::EngineFailure => f.write_str("engine failure"),
        }
    }
}

/// Score at which a mate is reported, before subtracting the distance.
pub const MATE_SCORE: i32 = 10_000;

/// Engine evaluation, relative to the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Score {
    Centipawns(i32),
    /// Mate in N moves; negative when the side to move is getting mated.
    Mate(i32),
}

impl Score {
    /// Centipawns from White's point of view, with mates mapped to
    /// `mate_score - distance`.
    pub fn white_cp(self, side_to_move: Color, mate_score: i32) -> i32 {
        let cp = match self {
            Score::Centipawns(cp) => cp,
            Score::Mate(n) if n > 0 => mate_score - n,
            Score::Mate(n) => -mate_score - n,
        };
        match side_to_move {
            Color::White => cp,
            Color::Black => -cp,
        }
    }
}

pub fn square_name(sq: Square) -> String {
    let f = (b'a' + sq.file() as u8) as char;
    let r = (b'1' + sq.rank() as u8) as char;
    format!("{f}{r}")
}

pub fn parse_square(b: &[u8]) -> Option<Square> {
    match b {
        [f @ b'a'..=b'h', r @ b'1'..=b'8'] => Some(Square::new(
            File::index((f - b'a') as usize),
            Rank::index((r - b'1') as usize),
        )),
        _ => None,
    }
}

pub fn piece_char(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    }
}

fn promotion_piece(c: char) -> Option<Piece> {
    match c {
        'q' => Some(Piece::Queen),
        'r' => Some(Piece::Rook),
        'b' => Some(Piece::Bishop),
        'n' => Some(Piece::Knight),
        _ => None,
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
