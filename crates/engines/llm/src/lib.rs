//! Black-side move sources
//!
//! - [`ChatModel`]: a language model behind an OpenAI-compatible
//!   chat-completions endpoint
//! - [`HumanPlayer`]: a person typing moves at the terminal
//!
//! Both implement [`chess_core::CompletionModel`] and hand back raw text; it is
//! up to the caller to validate it.

mod chat;
mod human;

pub use chat::{ChatConfig, ChatModel};
pub use human::HumanPlayer;
