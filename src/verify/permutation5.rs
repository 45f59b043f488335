//! Permutation5 (排列5) verifier.
//!
//! Five digits, position-sensitive. Only an exact in-order match wins.

use super::PrizeVerifier;
use crate::types::{GameType, PrizeTier, TicketRow, Verdict, VerifyResult, WinningNumbers, STATUS_FIRST_PRIZE};

pub const POSITIONS: usize = 5;

const FIRST_PRIZE: PrizeTier = PrizeTier { rank: 1, payout: 100_000 };

#[derive(Debug, Clone, Copy, Default)]
pub struct Permutation5Verifier;

impl PrizeVerifier for Permutation5Verifier {
    fn game(&self) -> GameType {
        GameType::Permutation5
    }

    fn verify(&self, row: &TicketRow, winning: &WinningNumbers) -> VerifyResult<Verdict> {
        let exact = row.red.len() == POSITIONS
            && winning.red.len() == POSITIONS
            && row.red.iter().zip(&winning.red).all(|(a, b)| a == b);

        if !exact {
            return Ok(Verdict::no_win());
        }
        Ok(Verdict {
            rank: FIRST_PRIZE.rank,
            payout: FIRST_PRIZE.payout,
            status: STATUS_FIRST_PRIZE.to_string(),
        })
    }
}
