//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section is optional: a missing file or section falls back to
//! defaults that match the engine's built-in behavior.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::types::{GameType, NumberToken, VerifyError};
use crate::verify::{double_color, resolve_game, DEFAULT_MAX_RED_TOKENS};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    /// Known drawing results served by the in-memory lookup.
    #[serde(default)]
    pub draws: Vec<DrawConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Largest DoubleColor red selection expanded into sub-tickets.
    #[serde(default = "default_max_red_tokens")]
    pub max_red_tokens: usize,
    /// Reject malformed rows instead of scoring them as non-winning.
    #[serde(default)]
    pub strict_validation: bool,
    /// Score against the "no real data" sentinel when a drawing is unknown,
    /// instead of failing the ticket.
    #[serde(default = "default_true")]
    pub fallback_to_placeholder: bool,
}

fn default_max_red_tokens() -> usize {
    DEFAULT_MAX_RED_TOKENS
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_red_tokens: DEFAULT_MAX_RED_TOKENS,
            strict_validation: false,
            fallback_to_placeholder: true,
        }
    }
}

/// One known drawing.
#[derive(Debug, Deserialize, Clone)]
pub struct DrawConfig {
    /// Game label, resolved the same way ticket labels are.
    pub game: String,
    pub issue: String,
    pub red: Vec<NumberToken>,
    #[serde(default)]
    pub blue: Vec<NumberToken>,
    /// Draw date as a quoted `YYYY-MM-DD` string.
    #[serde(default)]
    pub drawn_on: Option<NaiveDate>,
}

impl DrawConfig {
    pub fn game_type(&self) -> GameType {
        resolve_game(&self.game)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise run on defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!(path, "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse and validate TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> std::result::Result<(), VerifyError> {
        if self.engine.max_red_tokens < double_color::BASE_RED {
            return Err(VerifyError::Config(format!(
                "engine.max_red_tokens must be at least {}, got {}",
                double_color::BASE_RED,
                self.engine.max_red_tokens
            )));
        }
        for draw in &self.draws {
            if !draw.game_type().is_supported() {
                return Err(VerifyError::Config(format!(
                    "draw {} has unsupported game label {:?}",
                    draw.issue, draw.game
                )));
            }
        }
        Ok(())
    }
}
