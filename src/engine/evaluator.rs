//! Ticket evaluator — per-row scoring and stake multipliers.
//!
//! Resolves the verifier once per ticket, scores every row on its own,
//! multiplies each row's payout by its stake and sums the results.
//! Arithmetic is checked: an overflow fails the ticket, it never wraps.

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::types::{
    GameType, Ticket, TicketRow, VerificationDetail, VerificationResult, VerifyError, VerifyResult,
    WinningNumbers,
};
use crate::verify::{resolve_game, validate_row, PrizeVerifier, Verifier};

#[derive(Debug, Clone, Default)]
pub struct TicketEvaluator {
    config: EngineConfig,
}

impl TicketEvaluator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Access the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score a whole ticket against one drawing.
    pub fn evaluate(&self, ticket: &Ticket, winning: &WinningNumbers) -> VerifyResult<VerificationResult> {
        let game = resolve_game(&ticket.game);
        self.evaluate_rows(game, &ticket.rows, winning)
    }

    /// Score rows for an already-resolved game.
    ///
    /// Unsupported games produce a single "unsupported game" detail with
    /// zero payout; no verifier runs.
    pub fn evaluate_rows(
        &self,
        game: GameType,
        rows: &[TicketRow],
        winning: &WinningNumbers,
    ) -> VerifyResult<VerificationResult> {
        let Some(verifier) = Verifier::for_game(game, self.config.max_red_tokens) else {
            debug!(rows = rows.len(), "Unsupported game, skipping scoring");
            return Ok(VerificationResult {
                game,
                total_payout: 0,
                details: vec![VerificationDetail::unsupported()],
            });
        };

        let mut total: u64 = 0;
        let mut details = Vec::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            let row_index = i + 1;
            let detail = self.score_row(&verifier, row, row_index, winning).map_err(|e| {
                warn!(%game, row = row_index, error = %e, "Row rejected");
                e
            })?;

            total = total.checked_add(detail.payout).ok_or(VerifyError::ArithmeticOverflow {
                operation: "ticket total",
                lhs: total,
                rhs: detail.payout,
            })?;
            details.push(detail);
        }

        Ok(VerificationResult {
            game,
            total_payout: total,
            details,
        })
    }

    fn score_row(
        &self,
        verifier: &Verifier,
        row: &TicketRow,
        row_index: usize,
        winning: &WinningNumbers,
    ) -> VerifyResult<VerificationDetail> {
        if self.config.strict_validation {
            validate_row(verifier.game(), row, row_index, self.config.max_red_tokens)?;
        }

        let verdict = verifier.verify(row, winning)?;
        let payout = verdict
            .payout
            .checked_mul(u64::from(row.multiplier))
            .ok_or(VerifyError::ArithmeticOverflow {
                operation: "stake multiplier",
                lhs: verdict.payout,
                rhs: u64::from(row.multiplier),
            })?;

        debug!(
            row = row_index,
            rank = verdict.rank,
            base = verdict.payout,
            multiplier = row.multiplier,
            payout,
            "Row scored"
        );

        Ok(VerificationDetail {
            row_index,
            rank: verdict.rank,
            payout,
            status: verdict.status,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
