//! LLM Chess Arena
//!
//! This crate provides infrastructure for:
//! - Playing a UCI engine (White) against a language model (Black)
//! - Validating the model's untrusted move text, with an invalid move scored
//!   as an immediate loss
//! - Running sessions of many games and tracking a simple rating
//! - Reporting wins/losses/draws and the move numbers where the model failed
//!
//! # Usage
//!
//! ```bash
//! # 25 games against Stockfish, report written as JSON as well
//! cargo run -p llm_arena -- run --games 25 --engine stockfish --json-out report.json
//!
//! # Offline dry run with random players on both sides
//! cargo run -p llm_arena -- run --games 10 --engine random --model random --seed 1
//!
//! # Play Black yourself
//! cargo run -p llm_arena -- play
//! ```

pub mod config;
pub mod game;
pub mod prompt;
pub mod rating;
pub mod report;
pub mod session;
pub mod validator;

pub use config::*;
pub use game::*;
pub use prompt::*;
pub use rating::*;
pub use report::*;
pub use session::*;
pub use validator::*;
