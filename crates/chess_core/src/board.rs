use std::fmt;

use cozy_chess::Board;

use crate::error::{FenError, IllegalMoveError};
use crate::types::*;

/// A chess position plus the history needed for repetition draws.
///
/// Moves go in and come out in standard UCI convention; the castling
/// translation to the board library's king-takes-rook encoding stays in here.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    /// Repetition keys of every position reached, oldest first
    history: Vec<String>,
}

impl Position {
    pub fn startpos() -> Self {
        Self::from_board(Board::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let board = Board::from_fen(fen.trim(), false).map_err(|_| FenError {
            fen: fen.to_string(),
        })?;
        Ok(Self::from_board(board))
    }

    fn from_board(board: Board) -> Self {
        let mut pos = Self {
            board,
            history: Vec::new(),
        };
        pos.history.push(pos.repetition_key());
        pos
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn halfmove_clock(&self) -> u8 {
        self.board.halfmove_clock()
    }

    pub fn fullmove_number(&self) -> u16 {
        self.board.fullmove_number()
    }

    /// Forsyth-Edwards Notation of the current position.
    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|piece_moves| {
            for mv in piece_moves {
                moves.push(self.from_board_move(mv));
            }
            false
        });
        moves
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// Apply a legal move. The position is left untouched on error.
    pub fn play(&mut self, mv: Move) -> Result<(), IllegalMoveError> {
        if !self.is_legal(mv) {
            return Err(IllegalMoveError { mv });
        }
        let board_move = self.to_board_move(mv);
        self.board.play(board_move);
        let key = self.repetition_key();
        self.history.push(key);
        Ok(())
    }

    /// Why the game is over, or `None` while it is still running.
    ///
    /// Checks in order: no legal moves, insufficient material, fifty-move
    /// rule, threefold repetition.
    pub fn termination(&self) -> Option<Termination> {
        if !self.has_legal_moves() {
            return Some(if self.in_check() {
                Termination::Checkmate
            } else {
                Termination::Stalemate
            });
        }
        if self.is_insufficient_material() {
            return Some(Termination::InsufficientMaterial);
        }
        if self.is_fifty_move_draw() {
            return Some(Termination::FiftyMoveRule);
        }
        if self.is_threefold_repetition() {
            return Some(Termination::Repetition);
        }
        None
    }

    pub fn is_terminal(&self) -> bool {
        self.termination().is_some()
    }

    pub fn result(&self) -> GameResult {
        match self.termination() {
            None => GameResult::Undetermined,
            Some(Termination::Checkmate) => match self.side_to_move() {
                Color::White => GameResult::BlackWin,
                Color::Black => GameResult::WhiteWin,
            },
            Some(_) => GameResult::Draw,
        }
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.board.halfmove_clock() >= 100
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let Some(current) = self.history.last() else {
            return false;
        };
        self.history.iter().filter(|&key| key == current).count() >= 3
    }

    /// Neither side can possibly deliver mate.
    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() {
            return false;
        }
        let knights = b.pieces(Piece::Knight);
        let bishops = b.pieces(Piece::Bishop);
        if knights.len() + bishops.len() <= 1 {
            return true;
        }
        if !knights.is_empty() {
            return false;
        }
        // Bishops only: drawn when they all share a square colour.
        let (mut light, mut dark) = (false, false);
        for sq in bishops {
            if (sq.file() as u8 + sq.rank() as u8) % 2 == 0 {
                dark = true;
            } else {
                light = true;
            }
        }
        !(light && dark)
    }

    /// Placement, side to move, castling rights, and the en-passant square
    /// only when an en-passant capture is actually legal.
    fn repetition_key(&self) -> String {
        let fen = self.board.to_string();
        let fields: Vec<&str> = fen.split_whitespace().take(4).collect();
        let [placement, side, castling, ep] = fields.as_slice() else {
            return fen;
        };
        let ep = if self.has_en_passant_capture() { *ep } else { "-" };
        format!("{placement} {side} {castling} {ep}")
    }

    fn has_en_passant_capture(&self) -> bool {
        self.legal_moves().into_iter().any(|mv| {
            self.piece_on(mv.from) == Some(Piece::Pawn)
                && mv.from.file() != mv.to.file()
                && self.piece_on(mv.to).is_none()
        })
    }

    fn has_legal_moves(&self) -> bool {
        let mut any = false;
        self.board.generate_moves(|piece_moves| {
            if piece_moves.into_iter().next().is_some() {
                any = true;
            }
            any
        });
        any
    }

    pub(crate) fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board.piece_on(sq)
    }

    fn to_board_move(&self, mv: Move) -> cozy_chess::Move {
        if self.board.piece_on(mv.from) == Some(Piece::King) && mv.from.rank() == mv.to.rank() {
            let from_file = mv.from.file() as i8;
            let to_file = mv.to.file() as i8;
            if (from_file - to_file).abs() == 2 {
                let rook_file = if to_file > from_file { File::H } else { File::A };
                return cozy_chess::Move {
                    from: mv.from,
                    to: Square::new(rook_file, mv.from.rank()),
                    promotion: None,
                };
            }
        }
        cozy_chess::Move {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
        }
    }

    fn from_board_move(&self, mv: cozy_chess::Move) -> Move {
        let castles = self.board.piece_on(mv.from) == Some(Piece::King)
            && self.board.color_on(mv.to) == self.board.color_on(mv.from);
        if castles {
            let king_file = if (mv.to.file() as u8) > (mv.from.file() as u8) {
                File::G
            } else {
                File::C
            };
            return Move::new(mv.from, Square::new(king_file, mv.from.rank()));
        }
        Move {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Board diagram, rank 8 first, `.` for empty squares.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = Square::new(File::index(file), Rank::index(rank));
                let c = match (self.board.piece_on(sq), self.board.color_on(sq)) {
                    (Some(piece), Some(Color::White)) => piece_char(piece).to_ascii_uppercase(),
                    (Some(piece), _) => piece_char(piece),
                    _ => '.',
                };
                if file > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{c}")?;
            }
            if rank > 0 {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
