//! Mock results lookup for integration testing.
//!
//! A deterministic `ResultsLookup` that serves a fixed table of drawings,
//! counts how often it is asked, and can be switched into a failing mode,
//! all in-memory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ticketcheck::draws::ResultsLookup;
use ticketcheck::types::{tokens, GameType, VerifyError, VerifyResult, WinningNumbers};

pub struct MockLookup {
    draws: HashMap<(GameType, String), WinningNumbers>,
    calls: Arc<AtomicUsize>,
    /// If set, every lookup fails with this message.
    force_error: Arc<Mutex<Option<String>>>,
}

impl MockLookup {
    /// Create a mock with one known drawing per supported game.
    pub fn new() -> Self {
        let mut draws = HashMap::new();
        draws.insert(
            (GameType::DoubleColor, "2025107".to_string()),
            WinningNumbers::new(tokens(&["02", "11", "15", "21", "28", "33"]), tokens(&["07"])),
        );
        draws.insert(
            (GameType::Lotto, "25001".to_string()),
            WinningNumbers::new(tokens(&["01", "02", "03", "04", "05"]), tokens(&["01", "02"])),
        );
        draws.insert(
            (GameType::Permutation5, "25250".to_string()),
            WinningNumbers::new(tokens(&["1", "2", "3", "4", "5"]), vec![]),
        );
        Self {
            draws,
            calls: Arc::new(AtomicUsize::new(0)),
            force_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Force all subsequent lookups to fail.
    pub fn set_error(&self, msg: &str) {
        *self.force_error.lock().unwrap() = Some(msg.to_string());
    }

    /// Number of lookups served so far, failures included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResultsLookup for MockLookup {
    async fn winning_numbers(&self, game: GameType, issue: &str) -> VerifyResult<WinningNumbers> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.force_error.lock().unwrap().as_ref() {
            return Err(VerifyError::Lookup(err.clone()));
        }
        self.draws
            .get(&(game, issue.trim().to_string()))
            .cloned()
            .ok_or_else(|| VerifyError::NotFound {
                game,
                issue: issue.to_string(),
            })
    }
}
