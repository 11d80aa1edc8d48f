//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - The reqwest-based ledger backend client
//! - Tokio runtime bridge for async operations

pub mod ledger;
pub mod runtime;

pub use ledger::{HttpLedger, LedgerApi, LedgerError};
pub use runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
