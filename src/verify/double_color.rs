//! DoubleColor (双色球) verifier.
//!
//! Base selection is 6 red + 1 blue. A row with more red or blue numbers
//! is a multi-number ticket: every 6-red sub-selection is paired with
//! every chosen blue number, and each pair is scored on its own.

use tracing::debug;

use super::PrizeVerifier;
use crate::numbers::{binomial, intersect_count, Combinations};
use crate::types::{GameType, PrizeTier, TicketRow, Verdict, VerifyError, VerifyResult, WinningNumbers};

/// Red numbers in one base selection.
pub const BASE_RED: usize = 6;

// ---------------------------------------------------------------------------
// Payout table
// ---------------------------------------------------------------------------

/// (red hits, blue hits) → tier. Rank 4 and rank 5 each have two routes.
const TIERS: &[(usize, usize, PrizeTier)] = &[
    (6, 1, PrizeTier { rank: 1, payout: 5_000_000 }),
    (6, 0, PrizeTier { rank: 2, payout: 100_000 }),
    (5, 1, PrizeTier { rank: 3, payout: 3_000 }),
    (5, 0, PrizeTier { rank: 4, payout: 200 }),
    (4, 1, PrizeTier { rank: 4, payout: 200 }),
    (4, 0, PrizeTier { rank: 5, payout: 10 }),
    (3, 1, PrizeTier { rank: 5, payout: 10 }),
];

/// Any other pair that hits the blue ball.
const BLUE_ONLY_TIER: PrizeTier = PrizeTier { rank: 6, payout: 5 };

/// Look up the tier for one (combination, blue) pair.
pub fn tier_for(red_hits: usize, blue_hits: usize) -> Option<PrizeTier> {
    TIERS
        .iter()
        .find(|(r, b, _)| *r == red_hits && *b == blue_hits)
        .map(|(_, _, tier)| *tier)
        .or_else(|| (blue_hits == 1).then_some(BLUE_ONLY_TIER))
}

// ---------------------------------------------------------------------------
// Verifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DoubleColorVerifier {
    max_red_tokens: usize,
}

impl DoubleColorVerifier {
    pub fn new(max_red_tokens: usize) -> Self {
        Self { max_red_tokens }
    }

    pub fn max_red_tokens(&self) -> usize {
        self.max_red_tokens
    }
}

impl Default for DoubleColorVerifier {
    fn default() -> Self {
        Self::new(super::DEFAULT_MAX_RED_TOKENS)
    }
}

impl PrizeVerifier for DoubleColorVerifier {
    fn game(&self) -> GameType {
        GameType::DoubleColor
    }

    /// Sum the payout of every winning (6-red combination, blue) pair and
    /// report the best rank among them.
    fn verify(&self, row: &TicketRow, winning: &WinningNumbers) -> VerifyResult<Verdict> {
        if row.red.len() > self.max_red_tokens {
            return Err(VerifyError::LimitExceeded {
                tokens: row.red.len(),
                limit: self.max_red_tokens,
            });
        }

        debug!(
            red = row.red.len(),
            blue = row.blue.len(),
            combinations = binomial(row.red.len(), BASE_RED).unwrap_or(0),
            "Expanding DoubleColor row"
        );

        let winning_blue = winning.blue.first();
        let mut best_rank: u8 = 0;
        let mut total: u64 = 0;

        for combination in Combinations::new(&row.red, BASE_RED) {
            let red_hits = intersect_count(combination.iter().copied(), &winning.red);

            for blue in &row.blue {
                let blue_hits = usize::from(winning_blue == Some(blue));

                let Some(tier) = tier_for(red_hits, blue_hits) else {
                    continue;
                };
                total = total.checked_add(tier.payout).ok_or(VerifyError::ArithmeticOverflow {
                    operation: "pair summation",
                    lhs: total,
                    rhs: tier.payout,
                })?;
                if best_rank == 0 || tier.rank < best_rank {
                    best_rank = tier.rank;
                }
            }
        }

        Ok(Verdict::from_total(best_rank, total))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
