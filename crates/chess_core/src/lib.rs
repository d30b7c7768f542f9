pub mod board;
pub mod error;
pub mod san;
pub mod types;

pub use board::Position;
pub use error::*;
pub use types::*;

use std::time::Duration;

// =============================================================================
// Move sources: the engine plays White, the model plays Black
// =============================================================================

/// A move-search engine: given a position and a time budget, pick a move.
///
/// Implementations are long-lived; one value is created per session and
/// reused for every game.
pub trait MoveEngine {
    /// Search for the best move within `move_time`.
    fn best_move(&mut self, pos: &Position, move_time: Duration) -> Result<Move, EngineError>;

    /// Score `pos` relative to the side to move.
    fn evaluate(&mut self, pos: &Position, think_time: Duration) -> Result<Score, EngineError>;

    /// Name used in logs and reports
    fn name(&self) -> &str;

    /// Reset internal state before a new game.
    fn new_game(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}

/// What a model is asked on its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Full instruction text sent to the model
    pub text: String,
    /// Position the prompt was built from
    pub fen: String,
    /// 1-based count of moves this side has been asked for in the game
    pub move_number: u32,
}

/// A text-completion move source. Its replies are untrusted.
pub trait CompletionModel {
    fn complete(&mut self, prompt: &Prompt) -> Result<String, ModelError>;

    fn name(&self) -> &str;
}
