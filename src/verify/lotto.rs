//! Lotto (大乐透) verifier.
//!
//! Base selection is 5 red (front zone) + 2 blue (back zone). Rows are
//! scored directly against their full selection: a row carrying extra
//! numbers is not expanded into sub-selections.

use super::PrizeVerifier;
use crate::numbers::intersect_count;
use crate::types::{GameType, PrizeTier, TicketRow, Verdict, VerifyResult, WinningNumbers};

pub const BASE_RED: usize = 5;
pub const BASE_BLUE: usize = 2;

/// (red hits, blue hits) → tier.
const TIERS: &[(usize, usize, PrizeTier)] = &[
    (5, 2, PrizeTier { rank: 1, payout: 10_000_000 }),
    (5, 1, PrizeTier { rank: 2, payout: 200_000 }),
    (5, 0, PrizeTier { rank: 3, payout: 10_000 }),
    (4, 2, PrizeTier { rank: 4, payout: 3_000 }),
    (4, 1, PrizeTier { rank: 5, payout: 300 }),
    (3, 2, PrizeTier { rank: 6, payout: 200 }),
    (4, 0, PrizeTier { rank: 7, payout: 100 }),
    (3, 1, PrizeTier { rank: 8, payout: 15 }),
    (2, 2, PrizeTier { rank: 8, payout: 15 }),
    (3, 0, PrizeTier { rank: 9, payout: 5 }),
    (2, 1, PrizeTier { rank: 9, payout: 5 }),
    (1, 2, PrizeTier { rank: 9, payout: 5 }),
    (0, 2, PrizeTier { rank: 9, payout: 5 }),
];

pub fn tier_for(red_hits: usize, blue_hits: usize) -> Option<PrizeTier> {
    TIERS
        .iter()
        .find(|(r, b, _)| *r == red_hits && *b == blue_hits)
        .map(|(_, _, tier)| *tier)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LottoVerifier;

impl PrizeVerifier for LottoVerifier {
    fn game(&self) -> GameType {
        GameType::Lotto
    }

    fn verify(&self, row: &TicketRow, winning: &WinningNumbers) -> VerifyResult<Verdict> {
        let red_hits = intersect_count(&row.red, &winning.red);
        let blue_hits = intersect_count(&row.blue, &winning.blue);

        Ok(match tier_for(red_hits, blue_hits) {
            Some(tier) => Verdict::from_total(tier.rank, tier.payout),
            None => Verdict::no_win(),
        })
    }
}
