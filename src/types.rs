//! Shared types for the verification engine.
//!
//! These types form the data model used across all modules. Every value
//! here is request-scoped and immutable once built: a ticket goes in,
//! a `VerificationResult` comes out, and nothing outlives the call.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// One lottery number in canonical form, e.g. `"02"`.
///
/// Equality is exact string comparison. `"2"` and `"02"` are different
/// tokens; turning loose recognizer output into canonical tokens is the
/// job of [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberToken(String);

impl NumberToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NumberToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NumberToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NumberToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Build a token vector from string literals. Mostly for tests and config.
pub fn tokens<S: AsRef<str>>(values: &[S]) -> Vec<NumberToken> {
    values.iter().map(|v| NumberToken::new(v.as_ref())).collect()
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

fn default_multiplier() -> u32 {
    1
}

/// One selection line on a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRow {
    /// Red / primary pool selection, in printed order.
    #[serde(default)]
    pub red: Vec<NumberToken>,
    /// Blue / secondary pool selection, in printed order.
    #[serde(default)]
    pub blue: Vec<NumberToken>,
    /// Stake multiplier printed on the ticket.
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,
    /// Play mode as printed ("single", "multiple", ...). Never scored.
    #[serde(default)]
    pub mode: String,
}

impl TicketRow {
    pub fn new(red: Vec<NumberToken>, blue: Vec<NumberToken>, multiplier: u32) -> Self {
        Self {
            red,
            blue,
            multiplier,
            mode: String::new(),
        }
    }
}

/// A whole ticket: one game, one drawing, one or more rows.
///
/// Field names follow the recognizer payload (`type`, `issue`, `tickets`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Free-text game label, resolved by [`crate::verify::resolve_game`].
    #[serde(rename = "type")]
    pub game: String,
    /// Drawing identifier. Opaque; only ever used as a lookup key.
    pub issue: String,
    #[serde(rename = "tickets", default)]
    pub rows: Vec<TicketRow>,
}

// ---------------------------------------------------------------------------
// Winning numbers
// ---------------------------------------------------------------------------

/// Official result of one drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningNumbers {
    pub red: Vec<NumberToken>,
    #[serde(default)]
    pub blue: Vec<NumberToken>,
}

/// Token used by the "no real data" sentinel. Never a valid drawn number.
const PLACEHOLDER_TOKEN: &str = "00";

impl WinningNumbers {
    pub fn new(red: Vec<NumberToken>, blue: Vec<NumberToken>) -> Self {
        Self { red, blue }
    }

    /// Sentinel for a drawing with no known result. Scores every row as
    /// non-winning without being an error.
    pub fn placeholder() -> Self {
        Self {
            red: vec![NumberToken::from(PLACEHOLDER_TOKEN)],
            blue: vec![NumberToken::from(PLACEHOLDER_TOKEN)],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

impl fmt::Display for WinningNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |v: &[NumberToken]| {
            v.iter().map(NumberToken::as_str).collect::<Vec<_>>().join(" ")
        };
        write!(f, "[{}] + [{}]", join(&self.red), join(&self.blue))
    }
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

/// The closed set of games the engine knows how to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    DoubleColor,
    Lotto,
    Permutation5,
    Unsupported,
}

impl GameType {
    pub fn is_supported(&self) -> bool {
        !matches!(self, GameType::Unsupported)
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameType::DoubleColor => write!(f, "DoubleColor"),
            GameType::Lotto => write!(f, "Lotto"),
            GameType::Permutation5 => write!(f, "Permutation5"),
            GameType::Unsupported => write!(f, "Unsupported"),
        }
    }
}

/// One row of a game's payout table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrizeTier {
    /// Prize rank; 1 is the jackpot.
    pub rank: u8,
    /// Payout per unit stake, in yuan.
    pub payout: u64,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// What a verifier reports for a single row, before the stake multiplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Best (lowest) rank won, or 0 for no win.
    pub rank: u8,
    /// Un-multiplied payout.
    pub payout: u64,
    pub status: String,
}

pub const STATUS_NO_WIN: &str = "no win";
pub const STATUS_FIRST_PRIZE: &str = "first prize";
pub const STATUS_UNSUPPORTED: &str = "unsupported game";

impl Verdict {
    pub fn no_win() -> Self {
        Self {
            rank: 0,
            payout: 0,
            status: STATUS_NO_WIN.to_string(),
        }
    }

    /// Verdict for a summed payout: "no win" at zero, otherwise a message
    /// carrying the amount.
    pub fn from_total(rank: u8, payout: u64) -> Self {
        if payout == 0 {
            return Self::no_win();
        }
        Self {
            rank,
            payout,
            status: format!("win: {payout} yuan"),
        }
    }

    pub fn is_win(&self) -> bool {
        self.payout > 0
    }
}

/// Per-row outcome as it appears in the final result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationDetail {
    /// 1-based row position; 0 for ticket-level entries.
    pub row_index: usize,
    pub rank: u8,
    /// Payout after the row's stake multiplier.
    pub payout: u64,
    pub status: String,
}

impl VerificationDetail {
    pub fn unsupported() -> Self {
        Self {
            row_index: 0,
            rank: 0,
            payout: 0,
            status: STATUS_UNSUPPORTED.to_string(),
        }
    }
}

/// Outcome for a whole ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub game: GameType,
    /// Sum of every detail's payout.
    pub total_payout: u64,
    pub details: Vec<VerificationDetail>,
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let winning_rows = self.details.iter().filter(|d| d.payout > 0).count();
        write!(
            f,
            "{}: {} row(s), {} winning, total {} yuan",
            self.game,
            self.details.len(),
            winning_rows,
            self.total_payout,
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the verification engine.
///
/// Every variant is scoped to the ticket being evaluated; a batch keeps
/// going when one of its tickets fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("Too many red numbers to expand: {tokens} exceeds limit of {limit}")]
    LimitExceeded { tokens: usize, limit: usize },

    #[error("Payout overflow in {operation}: {lhs} and {rhs}")]
    ArithmeticOverflow {
        operation: &'static str,
        lhs: u64,
        rhs: u64,
    },

    #[error("Invalid row {row_index}: {reason}")]
    InputValidation { row_index: usize, reason: String },

    #[error("No winning numbers for {game} issue {issue}")]
    NotFound { game: GameType, issue: String },

    #[error("Results lookup failed: {0}")]
    Lookup(String),

    #[error("Evaluation task failed: {0}")]
    Task(String),

    #[error("Recognizer payload error: {0}")]
    Payload(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type VerifyResult<T> = std::result::Result<T, VerifyError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
