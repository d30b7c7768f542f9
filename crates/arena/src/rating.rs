//! Fixed-step rating tracking
//!
//! This is deliberately not Elo: there is no expected score and no K-factor.
//! The model's rating moves by a constant amount per decisive game.

use chess_core::GameResult;
use serde::{Deserialize, Serialize};

/// Starting rating for a fresh session
pub const DEFAULT_RATING: i32 = 1500;

/// Gain for a game the model (Black) wins
pub const WIN_INCREMENT: i32 = 50;

/// Loss for a game the model (Black) loses
pub const LOSS_DECREMENT: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRule {
    pub win_increment: i32,
    pub loss_decrement: i32,
}

impl Default for RatingRule {
    fn default() -> Self {
        Self {
            win_increment: WIN_INCREMENT,
            loss_decrement: LOSS_DECREMENT,
        }
    }
}

impl RatingRule {
    /// Rating after one game, from Black's point of view.
    ///
    /// Draws and aborted games leave the rating unchanged.
    pub fn update(&self, rating: i32, result: GameResult) -> i32 {
        match result {
            GameResult::BlackWin => rating + self.win_increment,
            GameResult::WhiteWin => rating - self.loss_decrement,
            GameResult::Draw | GameResult::Undetermined => rating,
        }
    }

    /// Fold a sequence of results, starting from `rating`.
    pub fn apply_all(&self, rating: i32, results: impl IntoIterator<Item = GameResult>) -> i32 {
        results
            .into_iter()
            .fold(rating, |rating, result| self.update(rating, result))
    }
}

/// Update with the default ±50 rule.
pub fn update(rating: i32, result: GameResult) -> i32 {
    RatingRule::default().update(rating, result)
}

#[cfg(test)]
#[path = "rating_tests.rs"]
mod rating_tests;
