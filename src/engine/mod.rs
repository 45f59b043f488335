//! Core engine — ticket scoring and batch evaluation.

pub mod evaluator;
pub mod batch;

pub use batch::{BatchEvaluator, BatchReport, TicketReport};
pub use evaluator::TicketEvaluator;
