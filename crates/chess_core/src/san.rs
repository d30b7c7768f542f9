//! Standard Algebraic Notation input, for human players only.

use crate::board::Position;
use crate::error::SanError;
use crate::types::*;

impl Position {
    /// Resolve SAN text (`Nf3`, `exd5`, `e8=Q`, `O-O`, `Rad1+`) against the
    /// legal moves of this position.
    pub fn parse_san(&self, san: &str) -> Result<Move, SanError> {
        let text = san
            .trim()
            .trim_end_matches(|c| matches!(c, '+' | '#' | '!' | '?'));
        if text.is_empty() {
            return Err(SanError::Empty);
        }

        match text {
            "O-O" | "0-0" => return self.find_castle(san, File::G),
            "O-O-O" | "0-0-0" => return self.find_castle(san, File::C),
            _ => {}
        }

        let syntax = || SanError::Syntax(san.to_string());

        let (body, promotion) = split_promotion(text).ok_or_else(syntax)?;
        let mut chars: Vec<char> = body.chars().collect();

        let piece = match chars.first() {
            Some('N') => Piece::Knight,
            Some('B') => Piece::Bishop,
            Some('R') => Piece::Rook,
            Some('Q') => Piece::Queen,
            Some('K') => Piece::King,
            _ => Piece::Pawn,
        };
        if piece != Piece::Pawn {
            chars.remove(0);
        }
        if chars.len() < 2 {
            return Err(syntax());
        }
        let dest_text: String = chars[chars.len() - 2..].iter().collect();
        let to = parse_square(dest_text.as_bytes()).ok_or_else(syntax)?;

        let mut from_file = None;
        let mut from_rank = None;
        for &c in &chars[..chars.len() - 2] {
            match c {
                'a'..='h' => from_file = Some(c as u8 - b'a'),
                '1'..='8' => from_rank = Some(c as u8 - b'1'),
                'x' | ':' => {}
                _ => return Err(syntax()),
            }
        }
        if promotion.is_some() && piece != Piece::Pawn {
            return Err(syntax());
        }

        let candidates: Vec<Move> = self
            .legal_moves()
            .into_iter()
            .filter(|mv| {
                mv.to == to
                    && mv.promotion == promotion
                    && self.piece_on(mv.from) == Some(piece)
                    && from_file.map_or(true, |f| mv.from.file() as u8 == f)
                    && from_rank.map_or(true, |r| mv.from.rank() as u8 == r)
            })
            .collect();

        match candidates.as_slice() {
            [] => Err(SanError::NoMatch(san.to_string())),
            [mv] => Ok(*mv),
            _ => Err(SanError::Ambiguous(san.to_string())),
        }
    }

    fn find_castle(&self, san: &str, king_file: File) -> Result<Move, SanError> {
        self.legal_moves()
            .into_iter()
            .find(|mv| {
                self.piece_on(mv.from) == Some(Piece::King)
                    && mv.to.file() == king_file
                    && (mv.from.file() as i8 - mv.to.file() as i8).abs() == 2
            })
            .ok_or_else(|| SanError::NoMatch(san.to_string()))
    }
}

/// Split `e8=Q` / `e8Q` into the move body and promotion piece.
fn split_promotion(text: &str) -> Option<(&str, Option<Piece>)> {
    let (body, piece) = match text.split_once('=') {
        Some((body, piece)) => (body, Some(piece)),
        None => {
            let last = text.chars().last()?;
            if matches!(last, 'Q' | 'R' | 'B' | 'N') && text.len() > 2 {
                (&text[..text.len() - 1], Some(&text[text.len() - 1..]))
            } else {
                (text, None)
            }
        }
    };
    let promotion = match piece {
        None => None,
        Some("Q") | Some("q") => Some(Piece::Queen),
        Some("R") | Some("r") => Some(Piece::Rook),
        Some("B") | Some("b") => Some(Piece::Bishop),
        Some("N") | Some("n") => Some(Piece::Knight),
        Some(_) => return None,
    };
    Some((body, promotion))
}

#[cfg(test)]
#[path = "san_tests.rs"]
mod san_tests;
