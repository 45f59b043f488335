//! Drawing results lookup.
//!
//! Defines the `ResultsLookup` trait the batch runner depends on, and
//! `StaticResults`, an in-memory implementation seeded from configuration.
//! A real results database would implement the same trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use crate::config::DrawConfig;
use crate::types::{tokens, GameType, VerifyError, VerifyResult, WinningNumbers};

/// Source of official winning numbers.
///
/// Implementors fail with `VerifyError::NotFound` for a (game, issue)
/// pair they have no result for. Whatever they return is authoritative.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultsLookup: Send + Sync {
    async fn winning_numbers(&self, game: GameType, issue: &str) -> VerifyResult<WinningNumbers>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// A stored drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub numbers: WinningNumbers,
    pub drawn_on: Option<NaiveDate>,
}

/// Fixed table of drawings keyed by (game, issue).
///
/// Issues are trimmed on insert and on lookup; nothing else about them is
/// interpreted.
#[derive(Debug, Clone, Default)]
pub struct StaticResults {
    draws: HashMap<(GameType, String), DrawRecord>,
}

impl StaticResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// The one drawing known out of the box: DoubleColor issue 2025107.
    pub fn with_defaults() -> Self {
        let mut results = Self::new();
        results.insert(
            GameType::DoubleColor,
            "2025107",
            WinningNumbers::new(tokens(&["02", "11", "15", "21", "28", "33"]), tokens(&["07"])),
            None,
        );
        results
    }

    /// Build from `[[draws]]` config entries. Labels go through the same
    /// registry as ticket labels.
    pub fn from_config(draws: &[DrawConfig]) -> VerifyResult<Self> {
        let mut results = Self::new();
        for draw in draws {
            let game = draw.game_type();
            if !game.is_supported() {
                return Err(VerifyError::Config(format!(
                    "draw {} has unsupported game label {:?}",
                    draw.issue, draw.game
                )));
            }
            results.insert(
                game,
                &draw.issue,
                WinningNumbers::new(draw.red.clone(), draw.blue.clone()),
                draw.drawn_on,
            );
        }
        debug!(count = results.len(), "Loaded drawings from config");
        Ok(results)
    }

    /// Add or replace a drawing.
    pub fn insert(
        &mut self,
        game: GameType,
        issue: &str,
        numbers: WinningNumbers,
        drawn_on: Option<NaiveDate>,
    ) {
        self.draws.insert(
            (game, issue.trim().to_string()),
            DrawRecord { numbers, drawn_on },
        );
    }

    pub fn get(&self, game: GameType, issue: &str) -> Option<&DrawRecord> {
        self.draws.get(&(game, issue.trim().to_string()))
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

#[async_trait]
impl ResultsLookup for StaticResults {
    async fn winning_numbers(&self, game: GameType, issue: &str) -> VerifyResult<WinningNumbers> {
        let record = self.get(game, issue).ok_or_else(|| VerifyError::NotFound {
            game,
            issue: issue.trim().to_string(),
        })?;
        debug!(
            %game,
            issue = issue.trim(),
            drawn_on = ?record.drawn_on,
            numbers = %record.numbers,
            "Drawing found"
        );
        Ok(record.numbers.clone())
    }
}
