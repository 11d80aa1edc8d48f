//! Ledger backend access
//!
//! `LedgerApi` is the seam between the runtime worker and the backend;
//! `HttpLedger` implements it over reqwest.

mod client;
mod error;

pub use client::{Endpoint, HttpLedger, LedgerApi};
pub use error::LedgerError;
