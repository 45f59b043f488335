//! Per-game prize verifiers and the label registry.
//!
//! Defines the `PrizeVerifier` contract and provides implementations for:
//! - DoubleColor (双色球) — 6 red + 1 blue, multi-number rows expanded
//! - Lotto (大乐透) — 5 red + 2 blue, scored directly
//! - Permutation5 (排列5) — exact 5-position ordered match
//!
//! Dispatch is closed: a label resolves to a `GameType`, and a `GameType`
//! maps to exactly one `Verifier` variant (or none, for unsupported games).

pub mod double_color;
pub mod lotto;
pub mod permutation5;

use crate::types::{GameType, TicketRow, Verdict, VerifyError, VerifyResult, WinningNumbers};
use double_color::DoubleColorVerifier;
use lotto::LottoVerifier;
use permutation5::Permutation5Verifier;

/// Default cap on red numbers a DoubleColor row may carry into expansion.
/// C(20, 6) = 38,760 sub-tickets.
pub const DEFAULT_MAX_RED_TOKENS: usize = 20;

/// Scoring contract shared by every game.
///
/// Implementations are pure: same row and winning numbers, same verdict.
/// A row of the wrong shape scores as non-winning rather than failing.
pub trait PrizeVerifier: Send + Sync {
    /// The game this verifier scores.
    fn game(&self) -> GameType;

    /// Score one row against one drawing. The payout is per unit stake;
    /// the caller applies the multiplier.
    fn verify(&self, row: &TicketRow, winning: &WinningNumbers) -> VerifyResult<Verdict>;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Labels per game, checked in this order. First substring hit wins.
const GAME_LABELS: &[(GameType, &[&str])] = &[
    (GameType::DoubleColor, &["双色球", "DoubleColor"]),
    (GameType::Lotto, &["大乐透", "Lotto"]),
    (GameType::Permutation5, &["排列5", "Permutation5"]),
];

/// Resolve a free-text game label by case-sensitive substring match.
pub fn resolve_game(label: &str) -> GameType {
    GAME_LABELS
        .iter()
        .find(|(_, labels)| labels.iter().any(|l| label.contains(l)))
        .map(|(game, _)| *game)
        .unwrap_or(GameType::Unsupported)
}

/// A concrete verifier for one supported game.
#[derive(Debug, Clone)]
pub enum Verifier {
    DoubleColor(DoubleColorVerifier),
    Lotto(LottoVerifier),
    Permutation5(Permutation5Verifier),
}

impl Verifier {
    /// Pick the verifier for `game`. `None` for `GameType::Unsupported`.
    pub fn for_game(game: GameType, max_red_tokens: usize) -> Option<Self> {
        match game {
            GameType::DoubleColor => Some(Verifier::DoubleColor(DoubleColorVerifier::new(max_red_tokens))),
            GameType::Lotto => Some(Verifier::Lotto(LottoVerifier)),
            GameType::Permutation5 => Some(Verifier::Permutation5(Permutation5Verifier)),
            GameType::Unsupported => None,
        }
    }

    /// Resolve a label straight to a verifier.
    pub fn for_label(label: &str, max_red_tokens: usize) -> Option<Self> {
        Self::for_game(resolve_game(label), max_red_tokens)
    }
}

impl PrizeVerifier for Verifier {
    fn game(&self) -> GameType {
        match self {
            Verifier::DoubleColor(v) => v.game(),
            Verifier::Lotto(v) => v.game(),
            Verifier::Permutation5(v) => v.game(),
        }
    }

    fn verify(&self, row: &TicketRow, winning: &WinningNumbers) -> VerifyResult<Verdict> {
        match self {
            Verifier::DoubleColor(v) => v.verify(row, winning),
            Verifier::Lotto(v) => v.verify(row, winning),
            Verifier::Permutation5(v) => v.verify(row, winning),
        }
    }
}

// ---------------------------------------------------------------------------
// Row-shape validation
// ---------------------------------------------------------------------------

/// Strict shape check for callers that want malformed rows rejected
/// instead of scored as non-winning. `row_index` is 1-based. A DoubleColor
/// row over the expansion cap fails with `LimitExceeded`, as it would in
/// the verifier.
pub fn validate_row(
    game: GameType,
    row: &TicketRow,
    row_index: usize,
    max_red_tokens: usize,
) -> VerifyResult<()> {
    let invalid = |reason: String| VerifyError::InputValidation { row_index, reason };

    if row.multiplier == 0 {
        return Err(invalid("multiplier must be at least 1".into()));
    }

    let (red, blue) = (row.red.len(), row.blue.len());
    match game {
        GameType::DoubleColor => {
            if red < double_color::BASE_RED {
                return Err(invalid(format!("needs at least {} red numbers, got {red}", double_color::BASE_RED)));
            }
            if red > max_red_tokens {
                return Err(VerifyError::LimitExceeded { tokens: red, limit: max_red_tokens });
            }
            if blue == 0 {
                return Err(invalid("needs at least 1 blue number".into()));
            }
        }
        GameType::Lotto => {
            if red < lotto::BASE_RED || blue < lotto::BASE_BLUE {
                return Err(invalid(format!(
                    "needs at least {} red and {} blue numbers, got {red} and {blue}",
                    lotto::BASE_RED,
                    lotto::BASE_BLUE
                )));
            }
        }
        GameType::Permutation5 => {
            if red != permutation5::POSITIONS {
                return Err(invalid(format!("needs exactly {} digits, got {red}", permutation5::POSITIONS)));
            }
        }
        GameType::Unsupported => {}
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
