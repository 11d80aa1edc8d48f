//! Backend requests issued by views and the results they receive

use crate::domain::{Block, Pool, TransactRequest, Transaction, WalletInfo};
use crate::infrastructure::ledger::LedgerError;

/// Read-only backend state a view can fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    WalletInfo,
    Chain,
    Pool,
}

/// Mutating backend calls; their results are shown but never merged into
/// another view's snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Transact(TransactRequest),
    Mine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Fetch(Resource),
    Submit(Submission),
}

/// Successful response body, one variant per request kind
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    WalletInfo(WalletInfo),
    Chain(Vec<Block>),
    Pool(Pool),
    Transacted(Transaction),
    Mined(Block),
}

pub type Outcome = Result<Payload, LedgerError>;
