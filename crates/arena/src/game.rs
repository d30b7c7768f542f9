//! Game driver: one engine-vs-model game as an explicit state machine

use chess_core::{
    Color, CompletionModel, FailureKind, GameResult, Move, MoveEngine, Position, Termination,
    MATE_SCORE,
};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::prompt::{build_prompt, DEFAULT_PROMPT_TEMPLATE};
use crate::validator::{validate_as, Notation};

/// Per-game settings
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Engine search budget for each White move
    pub move_time: Duration,
    /// Budget for the evaluation after each Black move (None = skip)
    pub eval_time: Option<Duration>,
    /// Prompt sent to the model; `{fen}` is replaced by the position
    pub prompt_template: String,
    /// Notation accepted from the Black side
    pub black_notation: Notation,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            move_time: Duration::from_secs(2),
            eval_time: Some(Duration::from_millis(500)),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            black_notation: Notation::Uci,
        }
    }
}

/// Raw text a side answered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAttempt {
    pub side: Color,
    pub text: String,
    /// How many moves the model had been asked for, including this one.
    /// Only set for Black.
    pub move_number: Option<u32>,
}

/// How a finished game ended.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub result: GameResult,
    pub termination: Termination,
    /// Model move number that failed validation
    pub failing_move_number: Option<u32>,
    pub position: Position,
    /// Every move played, in order
    pub moves: Vec<Move>,
    pub attempts: Vec<MoveAttempt>,
}

impl GameOutcome {
    pub fn terminated_by_invalid_move(&self) -> bool {
        matches!(self.termination, Termination::InvalidMove(_))
    }

    /// Space-separated UCI move list.
    pub fn move_text(&self) -> String {
        self.moves
            .iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug)]
pub enum GameState {
    WhiteToMove,
    BlackToMove,
    Terminated(GameOutcome),
}

/// Drives one game between a White engine and a Black model.
pub struct Game<'a> {
    engine: &'a mut dyn MoveEngine,
    model: &'a mut dyn CompletionModel,
    config: &'a GameConfig,
    position: Position,
    model_moves: u32,
    moves: Vec<Move>,
    attempts: Vec<MoveAttempt>,
}

impl<'a> Game<'a> {
    pub fn new(
        engine: &'a mut dyn MoveEngine,
        model: &'a mut dyn CompletionModel,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            engine,
            model,
            config,
            position: Position::startpos(),
            model_moves: 0,
            moves: Vec::new(),
            attempts: Vec::new(),
        }
    }

    /// Play from the standard start until the game is over.
    pub fn play(mut self) -> GameOutcome {
        let mut state = GameState::WhiteToMove;
        loop {
            state = match state {
                GameState::Terminated(outcome) => return outcome,
                other => self.step(other),
            };
        }
    }

    /// Advance by one ply.
    fn step(&mut self, state: GameState) -> GameState {
        match state {
            GameState::WhiteToMove => self.white_turn(),
            GameState::BlackToMove => self.black_turn(),
            done @ GameState::Terminated(_) => done,
        }
    }

    /// Current position; after the game ends, the final one.
    pub fn position(&self) -> &Position {
        &self.position
    }

    fn white_turn(&mut self) -> GameState {
        let mv = match self.engine.best_move(&self.position, self.config.move_time) {
            Ok(mv) => mv,
            Err(e) => {
                warn!(engine = self.engine.name(), "engine search failed: {e}");
                return self.abort();
            }
        };
        self.attempts.push(MoveAttempt {
            side: Color::White,
            text: mv.to_string(),
            move_number: None,
        });
        if let Err(e) = self.position.play(mv) {
            warn!(engine = self.engine.name(), "engine played an {e}");
            return self.abort();
        }
        debug!("{} (White) plays {mv}", self.engine.name());
        self.moves.push(mv);
        self.after_move(GameState::BlackToMove)
    }

    fn black_turn(&mut self) -> GameState {
        self.model_moves += 1;
        let number = self.model_moves;
        let prompt = build_prompt(&self.config.prompt_template, &self.position, number);

        let text = match self.model.complete(&prompt) {
            Ok(text) => text,
            Err(e) => {
                // Scored the same as an empty reply.
                warn!(model = self.model.name(), move_number = number, "model request failed: {e}");
                String::new()
            }
        };
        debug!("{} (Black) move {number}: {:?}", self.model.name(), text);
        self.attempts.push(MoveAttempt {
            side: Color::Black,
            text: text.clone(),
            move_number: Some(number),
        });

        let mv = match validate_as(self.config.black_notation, &self.position, &text) {
            Ok(mv) => mv,
            Err(invalid) => {
                warn!(
                    model = self.model.name(),
                    move_number = number,
                    "{invalid}; Black forfeits"
                );
                return self.forfeit(invalid.kind(), number);
            }
        };
        if let Err(e) = self.position.play(mv) {
            // Validation already checked legality against this position.
            warn!("validated move rejected: {e}");
            return self.forfeit(FailureKind::Illegal, number);
        }
        self.moves.push(mv);
        self.log_evaluation();
        self.after_move(GameState::WhiteToMove)
    }

    fn after_move(&mut self, next: GameState) -> GameState {
        match self.position.termination() {
            Some(termination) => {
                let result = self.position.result();
                self.finish(result, termination, None)
            }
            None => next,
        }
    }

    fn log_evaluation(&mut self) {
        let Some(eval_time) = self.config.eval_time else {
            return;
        };
        match self.engine.evaluate(&self.position, eval_time) {
            Ok(score) => {
                let cp = score.white_cp(self.position.side_to_move(), MATE_SCORE);
                info!(move_number = self.model_moves, "evaluation after Black's move: {cp} cp");
            }
            Err(e) => warn!("evaluation failed: {e}"),
        }
    }

    fn abort(&mut self) -> GameState {
        let result = self.position.result();
        self.finish(result, Termination::EngineFailure, None)
    }

    fn forfeit(&mut self, kind: FailureKind, number: u32) -> GameState {
        self.finish(
            GameResult::WhiteWin,
            Termination::InvalidMove(kind),
            Some(number),
        )
    }

    fn finish(
        &mut self,
        result: GameResult,
        termination: Termination,
        failing_move_number: Option<u32>,
    ) -> GameState {
        info!("game over: {result} ({termination})");
        GameState::Terminated(GameOutcome {
            result,
            termination,
            failing_move_number,
            position: self.position.clone(),
            moves: self.moves.clone(),
            attempts: self.attempts.clone(),
        })
    }
}

/// Play one game with the given sources.
pub fn play_game(
    engine: &mut dyn MoveEngine,
    model: &mut dyn CompletionModel,
    config: &GameConfig,
) -> GameOutcome {
    Game::new(engine, model, config).play()
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
