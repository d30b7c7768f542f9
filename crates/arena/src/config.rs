//! Arena configuration loaded from TOML

use model_client::ChatConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use uci_engine::UciConfig;

use crate::game::GameConfig;
use crate::prompt::DEFAULT_PROMPT_TEMPLATE;
use crate::rating::{RatingRule, DEFAULT_RATING, LOSS_DECREMENT, WIN_INCREMENT};
use crate::session::SessionConfig;
use crate::validator::Notation;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Longest search or evaluation budget accepted, in seconds
pub const MAX_THINK_SECS: f64 = 3600.0;

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}

/// Top-level config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Games per session
    pub games: u32,
    pub engine: EngineSection,
    pub model: ModelSection,
    pub rating: RatingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSection {
    /// UCI executable, or `random` for the built-in random mover
    pub path: String,
    pub args: Vec<String>,
    pub move_time_secs: f64,
    /// Post-move evaluation budget; absent or 0 disables it
    pub eval_time_secs: Option<f64>,
    pub timeout_margin_ms: u64,
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelSection {
    /// Model identifier, or `random` for the built-in random replier
    pub name: String,
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub prompt_template: String,
    pub notation: Notation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatingSection {
    pub initial: i32,
    pub win_increment: i32,
    pub loss_decrement: i32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: 1,
            engine: EngineSection::default(),
            model: ModelSection::default(),
            rating: RatingSection::default(),
        }
    }
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            path: "stockfish".to_string(),
            args: Vec::new(),
            move_time_secs: 2.0,
            eval_time_secs: Some(0.5),
            timeout_margin_ms: 2000,
            options: BTreeMap::new(),
        }
    }
}

impl Default for ModelSection {
    fn default() -> Self {
        let chat = ChatConfig::default();
        Self {
            name: chat.model,
            base_url: chat.base_url,
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: chat.temperature,
            max_tokens: chat.max_tokens,
            timeout_secs: chat.timeout.as_secs(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            notation: Notation::Uci,
        }
    }
}

impl Default for RatingSection {
    fn default() -> Self {
        Self {
            initial: DEFAULT_RATING,
            win_increment: WIN_INCREMENT,
            loss_decrement: LOSS_DECREMENT,
        }
    }
}

impl ArenaConfig {
    /// Parse and validate TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject values that would make a session meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        if engine.path.trim().is_empty() {
            return Err(invalid("engine.path", "must not be empty"));
        }
        if !(engine.move_time_secs > 0.0 && engine.move_time_secs <= MAX_THINK_SECS) {
            return Err(invalid(
                "engine.move_time_secs",
                format!("must be above 0 and at most {MAX_THINK_SECS}"),
            ));
        }
        if let Some(eval) = engine.eval_time_secs {
            if !(eval >= 0.0 && eval <= MAX_THINK_SECS) {
                return Err(invalid(
                    "engine.eval_time_secs",
                    format!("must be between 0 and {MAX_THINK_SECS}"),
                ));
            }
        }

        let model = &self.model;
        if model.name.trim().is_empty() {
            return Err(invalid("model.name", "must not be empty"));
        }
        if !(0.0..=2.0).contains(&model.temperature) {
            return Err(invalid("model.temperature", "must be between 0 and 2"));
        }
        if model.max_tokens == 0 {
            return Err(invalid("model.max_tokens", "must be at least 1"));
        }
        if model.timeout_secs == 0 {
            return Err(invalid("model.timeout_secs", "must be at least 1"));
        }
        if model.prompt_template.trim().is_empty() {
            return Err(invalid("model.prompt_template", "must not be empty"));
        }
        Ok(())
    }

    pub fn move_time(&self) -> Duration {
        Duration::from_secs_f64(self.engine.move_time_secs)
    }

    /// `None` when post-move evaluation is switched off.
    pub fn eval_time(&self) -> Option<Duration> {
        self.engine
            .eval_time_secs
            .filter(|secs| *secs > 0.0)
            .map(Duration::from_secs_f64)
    }

    pub fn rating_rule(&self) -> RatingRule {
        RatingRule {
            win_increment: self.rating.win_increment,
            loss_decrement: self.rating.loss_decrement,
        }
    }

    /// Expects a config that passed [`ArenaConfig::validate`].
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            game: GameConfig {
                move_time: self.move_time(),
                eval_time: self.eval_time(),
                prompt_template: self.model.prompt_template.clone(),
                black_notation: self.model.notation,
            },
            rating: self.rating_rule(),
            initial_rating: self.rating.initial,
        }
    }

    pub fn uci_config(&self) -> UciConfig {
        UciConfig {
            path: PathBuf::from(&self.engine.path),
            args: self.engine.args.clone(),
            options: self.engine.options.clone(),
            timeout_margin: Duration::from_millis(self.engine.timeout_margin_ms),
            ..Default::default()
        }
    }

    /// Chat settings without the API key; see [`ChatConfig::with_key_from_env`].
    pub fn chat_config(&self) -> ChatConfig {
        ChatConfig {
            model: self.model.name.clone(),
            base_url: self.model.base_url.clone(),
            api_key: String::new(),
            temperature: self.model.temperature,
            max_tokens: self.model.max_tokens,
            timeout: Duration::from_secs(self.model.timeout_secs),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
