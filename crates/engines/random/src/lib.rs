//! Random Move Players
//!
//! Baselines that pick uniformly among the legal moves:
//! - [`RandomEngine`] stands in for the UCI engine on the White side
//! - [`RandomModel`] stands in for the language model on the Black side, and
//!   can be told to answer with junk some of the time
//!
//! Useful for running whole sessions without an engine binary or an API key,
//! and for exercising the game driver with real games in tests.

use chess_core::{
    CompletionModel, EngineError, ModelError, Move, MoveEngine, Position, Prompt, Score, Square,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;


/// Replies a broken model might give.
const JUNK_REPLIES: &[&str] = &["", "I resign.", "Nf6", "e7-e5", "zz99", "e9e10"];

/// An engine that plays random legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible move sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveEngine for RandomEngine {
    fn best_move(&mut self, pos: &Position, _move_time: Duration) -> Result<Move, EngineError> {
        pos.legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(EngineError::NoMove)
    }

    fn evaluate(&mut self, _pos: &Position, _think_time: Duration) -> Result<Score, EngineError> {
        Ok(Score::Centipawns(0))
    }

    fn name(&self) -> &str {
        "Random"
    }
}

/// A "model" that answers with a random legal move in UCI notation.
#[derive(Debug, Clone)]
pub struct RandomModel {
    rng: StdRng,
    error_rate: f64,
}

impl RandomModel {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            error_rate: 0.0,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            error_rate: 0.0,
        }
    }

    /// Answer with junk or a well-formed illegal move this often (0.0..=1.0).
    pub fn with_error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = error_rate.clamp(0.0, 1.0);
        self
    }

    fn junk(&mut self, pos: &Position) -> String {
        if self.rng.gen_bool(0.5) {
            // Well-formed coordinates that are not a legal move.
            let legal = pos.legal_moves();
            loop {
                let from = Square::index(self.rng.gen_range(0..64));
                let to = Square::index(self.rng.gen_range(0..64));
                let mv = Move::new(from, to);
                if from != to && !legal.contains(&mv) {
                    return mv.to_string();
                }
            }
        }
        JUNK_REPLIES
            .choose(&mut self.rng)
            .map(|s| s.to_string())
            .unwrap_or_default()
    }
}

impl Default for RandomModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionModel for RandomModel {
    fn complete(&mut self, prompt: &Prompt) -> Result<String, ModelError> {
        let Ok(pos) = Position::from_fen(&prompt.fen) else {
            return Ok(String::new());
        };
        if self.error_rate > 0.0 && self.rng.gen_bool(self.error_rate) {
            return Ok(self.junk(&pos));
        }
        Ok(pos
            .legal_moves()
            .choose(&mut self.rng)
            .map(Move::to_string)
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "Random"
    }
}
