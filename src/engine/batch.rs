//! Batch runner — concurrent evaluation with per-ticket failures.
//!
//! Fetches winning numbers for every ticket concurrently and scores each
//! one on the blocking pool. A failing ticket is recorded on its own
//! report; the rest of the batch is unaffected.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::evaluator::TicketEvaluator;
use crate::config::EngineConfig;
use crate::draws::ResultsLookup;
use crate::types::{Ticket, VerificationResult, VerifyError, VerifyResult, WinningNumbers};
use crate::verify::resolve_game;

// ---------------------------------------------------------------------------
// Batch result
// ---------------------------------------------------------------------------

/// Outcome for one ticket in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct TicketReport {
    /// 1-based position in the batch.
    pub ticket_index: usize,
    /// The ticket as it was scored, echoed back.
    pub ticket: Ticket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<VerificationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TicketReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_some()
    }

    pub fn total_payout(&self) -> u64 {
        self.result.as_ref().map_or(0, |r| r.total_payout)
    }
}

/// Result of evaluating a batch of tickets.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub succeeded: usize,
    pub failed: usize,
    /// Grand total over successful tickets. Absent if the sum overflows.
    pub total_payout: Option<u64>,
    pub tickets: Vec<TicketReport>,
}

impl BatchReport {
    /// Sum of every successful ticket's payout.
    pub fn checked_total(&self) -> VerifyResult<u64> {
        self.tickets.iter().try_fold(0u64, |acc, report| {
            acc.checked_add(report.total_payout())
                .ok_or(VerifyError::ArithmeticOverflow {
                    operation: "batch total",
                    lhs: acc,
                    rhs: report.total_payout(),
                })
        })
    }
}

// ---------------------------------------------------------------------------
// Batch evaluator
// ---------------------------------------------------------------------------

pub struct BatchEvaluator {
    lookup: Arc<dyn ResultsLookup>,
    evaluator: TicketEvaluator,
}

impl BatchEvaluator {
    pub fn new(lookup: Arc<dyn ResultsLookup>, config: EngineConfig) -> Self {
        Self {
            lookup,
            evaluator: TicketEvaluator::new(config),
        }
    }

    /// Evaluate every ticket. Reports come back in input order.
    pub async fn evaluate(&self, tickets: Vec<Ticket>) -> BatchReport {
        let batch_id = Uuid::new_v4();
        info!(%batch_id, tickets = tickets.len(), "Evaluating batch");

        let pending = tickets
            .into_iter()
            .enumerate()
            .map(|(i, ticket)| self.evaluate_one(i + 1, ticket));
        let reports = join_all(pending).await;

        let succeeded = reports.iter().filter(|r| r.is_ok()).count();
        let mut report = BatchReport {
            batch_id,
            evaluated_at: Utc::now(),
            succeeded,
            failed: reports.len() - succeeded,
            total_payout: None,
            tickets: reports,
        };
        match report.checked_total() {
            Ok(total) => report.total_payout = Some(total),
            Err(e) => warn!(%batch_id, error = %e, "Batch total not reported"),
        }

        info!(
            %batch_id,
            succeeded = report.succeeded,
            failed = report.failed,
            total_payout = ?report.total_payout,
            "Batch evaluation complete"
        );
        report
    }

    async fn evaluate_one(&self, ticket_index: usize, ticket: Ticket) -> TicketReport {
        match self.score(&ticket).await {
            Ok(result) => {
                debug!(ticket = ticket_index, %result, "Ticket scored");
                TicketReport {
                    ticket_index,
                    ticket,
                    result: Some(result),
                    error: None,
                }
            }
            Err(e) => {
                warn!(
                    ticket = ticket_index,
                    game = %ticket.game,
                    issue = %ticket.issue,
                    error = %e,
                    "Ticket evaluation failed"
                );
                TicketReport {
                    ticket_index,
                    ticket,
                    result: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn score(&self, ticket: &Ticket) -> VerifyResult<VerificationResult> {
        let game = resolve_game(&ticket.game);

        // Unsupported tickets never reach a verifier, so skip the lookup.
        let winning = if game.is_supported() {
            self.winning_numbers(ticket).await?
        } else {
            WinningNumbers::placeholder()
        };

        let evaluator = self.evaluator.clone();
        let ticket = ticket.clone();
        tokio::task::spawn_blocking(move || evaluator.evaluate_rows(game, &ticket.rows, &winning))
            .await
            .map_err(|e| VerifyError::Task(e.to_string()))?
    }

    async fn winning_numbers(&self, ticket: &Ticket) -> VerifyResult<WinningNumbers> {
        let game = resolve_game(&ticket.game);
        match self.lookup.winning_numbers(game, &ticket.issue).await {
            Ok(winning) => Ok(winning),
            Err(VerifyError::NotFound { .. }) if self.evaluator.config().fallback_to_placeholder => {
                warn!(
                    %game,
                    issue = %ticket.issue,
                    "No result for drawing, scoring against placeholder"
                );
                Ok(WinningNumbers::placeholder())
            }
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
