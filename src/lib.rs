//! TICKETCHECK — deterministic lottery prize verification
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod numbers;
pub mod verify;
pub mod draws;
pub mod normalize;
pub mod engine;
