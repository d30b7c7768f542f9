//! Prompt construction for the Black side

use chess_core::{Position, Prompt};

/// Placeholder replaced by the position's FEN.
pub const FEN_PLACEHOLDER: &str = "{fen}";

pub const DEFAULT_PROMPT_TEMPLATE: &str = "\
You are playing Black in a game of chess. The current position in FEN is:

{fen}

Reply with your next move in UCI coordinate notation, for example e7e5 or \
g8f6, or e2e1q for a promotion. Answer with the move only and nothing else.";

/// Fill `template` with the FEN of `position`.
///
/// A template without a `{fen}` placeholder gets the FEN appended on its own
/// line so the model always sees the position.
pub fn build_prompt(template: &str, position: &Position, move_number: u32) -> Prompt {
    let fen = position.fen();
    let text = if template.contains(FEN_PLACEHOLDER) {
        template.replace(FEN_PLACEHOLDER, &fen)
    } else {
        format!("{template}\n\n{fen}")
    };
    Prompt {
        text,
        fen,
        move_number,
    }
}
