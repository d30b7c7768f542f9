//! Session report: plain-text summary and JSON persistence

use chess_core::{GameResult, Termination};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::game::GameOutcome;
use crate::rating::RatingRule;
use crate::session::SessionStats;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One game as it appears in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// 1-based game number within the session
    pub number: u32,
    pub result: GameResult,
    pub termination: Termination,
    pub failing_move_number: Option<u32>,
    /// Text the model answered with when it forfeited
    pub failing_reply: Option<String>,
    /// Space-separated UCI moves
    pub moves: String,
    pub final_fen: String,
    pub rating_after: i32,
}

/// Everything worth keeping from a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub engine: String,
    pub model: String,
    pub initial_rating: i32,
    pub stats: SessionStats,
    pub games: Vec<GameSummary>,
}

impl SessionReport {
    pub fn new(engine: &str, model: &str, initial_rating: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            engine: engine.to_string(),
            model: model.to_string(),
            initial_rating,
            stats: SessionStats::new(initial_rating),
            games: Vec::new(),
        }
    }

    /// Fold a finished game into the stats and keep its summary.
    pub fn record(&mut self, outcome: &GameOutcome, rule: &RatingRule) {
        self.stats.record(outcome, rule);
        let failing_reply = outcome
            .failing_move_number
            .and_then(|_| outcome.attempts.last())
            .map(|attempt| attempt.text.clone());
        self.games.push(GameSummary {
            number: self.stats.games_played,
            result: outcome.result,
            termination: outcome.termination,
            failing_move_number: outcome.failing_move_number,
            failing_reply,
            moves: outcome.move_text(),
            final_fen: outcome.position.fen(),
            rating_after: self.stats.rating,
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Generate the end-of-session text report
    pub fn generate_report(&self) -> String {
        let s = &self.stats;
        let mut report = String::new();
        let _ = writeln!(report, "=== Session {} ===", self.id);
        let _ = writeln!(report, "{} (White) vs {} (Black)", self.engine, self.model);
        let _ = writeln!(report, "Total games: {}", s.games_played);
        let _ = writeln!(
            report,
            "Wins: {}, Losses: {}, Draws: {}, Invalid moves: {}",
            s.wins, s.losses, s.draws, s.invalid_moves
        );
        if s.invalid_moves > 0 {
            let _ = writeln!(report, "  malformed: {}, illegal: {}", s.malformed, s.illegal);
        }
        if s.aborted > 0 {
            let _ = writeln!(report, "Aborted (engine failure): {}", s.aborted);
        }
        let _ = writeln!(report, "Final rating: {} (started at {})", s.rating, self.initial_rating);
        report.push_str("Invalid move distribution (move number: count):\n");
        for (number, count) in &s.histogram {
            let _ = writeln!(report, "  {number}: {count}");
        }
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        print!("{}", self.generate_report());
    }

    /// Save the report as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ReportError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
