//! End-to-end tests: recognizer payload in, batch report out.

mod mock_lookup;
mod scenarios;
