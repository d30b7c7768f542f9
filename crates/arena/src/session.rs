//! Session aggregation: many games, one running rating

use chess_core::{CompletionModel, FailureKind, GameResult, MoveEngine, Termination};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::game::{play_game, GameConfig, GameOutcome};
use crate::rating::{RatingRule, DEFAULT_RATING};
use crate::report::SessionReport;

/// Settings shared by every game of a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub game: GameConfig,
    pub rating: RatingRule,
    pub initial_rating: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            rating: RatingRule::default(),
            initial_rating: DEFAULT_RATING,
        }
    }
}

/// Running totals, all from the model's (Black's) point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Games cut short by an engine failure
    pub aborted: u32,
    pub invalid_moves: u32,
    pub malformed: u32,
    pub illegal: u32,
    pub rating: i32,
    /// Failing model move number -> number of games that failed there
    pub histogram: BTreeMap<u32, u32>,
}

impl SessionStats {
    pub fn new(rating: i32) -> Self {
        Self {
            games_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            aborted: 0,
            invalid_moves: 0,
            malformed: 0,
            illegal: 0,
            rating,
            histogram: BTreeMap::new(),
        }
    }

    /// Fold one finished game into the totals.
    pub fn record(&mut self, outcome: &GameOutcome, rule: &RatingRule) {
        self.games_played += 1;
        match outcome.result {
            GameResult::BlackWin => self.wins += 1,
            GameResult::WhiteWin => self.losses += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Undetermined => self.aborted += 1,
        }

        if let Termination::InvalidMove(kind) = outcome.termination {
            self.invalid_moves += 1;
            match kind {
                FailureKind::Malformed => self.malformed += 1,
                FailureKind::Illegal => self.illegal += 1,
            }
            if let Some(number) = outcome.failing_move_number {
                *self.histogram.entry(number).or_insert(0) += 1;
            }
        }

        self.rating = rule.update(self.rating, outcome.result);
    }

    pub fn histogram_total(&self) -> u32 {
        self.histogram.values().sum()
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new(DEFAULT_RATING)
    }
}

/// Runs games back to back and aggregates them.
pub struct Session {
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Play `games` games, each from the standard start.
    ///
    /// A game that aborts is recorded and the session moves on.
    pub fn run(
        &self,
        engine: &mut dyn MoveEngine,
        model: &mut dyn CompletionModel,
        games: u32,
    ) -> SessionReport {
        let mut report = SessionReport::new(engine.name(), model.name(), self.config.initial_rating);

        for game_num in 1..=games {
            info!("=== Game {game_num}/{games} ===");
            if let Err(e) = engine.new_game() {
                warn!("engine reset failed: {e}");
            }

            let outcome = play_game(engine, model, &self.config.game);
            info!("final position:\n{}", outcome.position);
            match outcome.failing_move_number {
                Some(number) => info!(
                    "game {game_num}: {} (invalid move at move {number})",
                    outcome.result
                ),
                None => info!(
                    "game {game_num}: {} ({})",
                    outcome.result, outcome.termination
                ),
            }

            report.record(&outcome, &self.config.rating);
            let stats = &report.stats;
            info!(
                "score W/L/D {}-{}-{}, rating {}",
                stats.wins, stats.losses, stats.draws, stats.rating
            );
        }

        report.finish();
        report
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
