//! Domain layer - ledger data and its presentation rules
//!
//! Nothing here performs I/O; the infrastructure layer fetches these types and
//! the view modules render them.

pub mod format;
pub mod ledger;

pub use format::{format_timestamp, truncate_address, truncate_hash};
pub use ledger::{Block, Nonce, Pool, TransactRequest, Transaction, TransactionInput, WalletInfo};
