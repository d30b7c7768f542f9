//! A person at the terminal, playing through the same interface as a model.

use chess_core::{CompletionModel, ModelError, Position, Prompt};
use std::io::{BufRead, Write};

/// Reads one move per turn from `input`, after drawing the board on `output`.
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> CompletionModel for HumanPlayer<R, W> {
    fn complete(&mut self, prompt: &Prompt) -> Result<String, ModelError> {
        match Position::from_fen(&prompt.fen) {
            Ok(pos) => writeln!(self.output, "\n{pos}\n")?,
            Err(_) => writeln!(self.output, "\n{}\n", prompt.fen)?,
        }
        write!(self.output, "Move {} (SAN or UCI): ", prompt.move_number)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ModelError::Closed);
        }
        Ok(line)
    }

    fn name(&self) -> &str {
        "human"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt() -> Prompt {
        let pos = Position::startpos();
        Prompt {
            text: String::new(),
            fen: pos.fen(),
            move_number: 1,
        }
    }

    #[test]
    fn reads_a_line_and_draws_the_board() {
        let mut output = Vec::new();
        let mut human = HumanPlayer::new(Cursor::new("Nf6\n"), &mut output);

        assert_eq!(human.complete(&prompt()).unwrap(), "Nf6\n");
        drop(human);

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("r n b q k b n r"));
        assert!(shown.contains("Move 1 (SAN or UCI): "));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut human = HumanPlayer::new(Cursor::new(""), Vec::new());
        assert!(matches!(human.complete(&prompt()), Err(ModelError::Closed)));
    }
}
