//! Ledger data as served by the backend
//!
//! Every field the UI reads is tolerant of absence: the wallet starts out as an
//! empty object and mining-reward inputs only carry an address, so missing
//! values deserialize to defaults instead of failing the whole response.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Address/balance pair of the backend's local wallet
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WalletInfo {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub balance: Option<Number>,
}

impl WalletInfo {
    pub fn address_display(&self) -> String {
        self.address.clone().unwrap_or_default()
    }

    pub fn balance_display(&self) -> String {
        self.balance.as_ref().map(Number::to_string).unwrap_or_default()
    }
}

/// Proof-of-work nonce. The genesis block stores a label instead of a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Nonce {
    Number(u64),
    Label(String),
}

impl Default for Nonce {
    fn default() -> Self {
        Nonce::Number(0)
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nonce::Number(n) => write!(f, "{n}"),
            Nonce::Label(label) => f.write_str(label),
        }
    }
}

/// One block of the chain
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub hash: String,
    #[serde(default, alias = "lastHash")]
    pub last_hash: String,
    #[serde(default, deserialize_with = "transactions_or_empty")]
    pub data: Vec<Transaction>,
    #[serde(default)]
    pub nonce: Nonce,
    #[serde(default)]
    pub difficulty: u32,
}

/// Sender side of a transaction
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionInput {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub amount: Option<Number>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub signature: Option<Value>,
}

/// A transfer from one sender to any number of recipients
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub input: TransactionInput,
    #[serde(default, rename = "output", alias = "outputMap")]
    pub output_map: BTreeMap<String, Number>,
}

/// Pending transactions keyed by id, iterated in key order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pool {
    transactions: BTreeMap<String, Transaction>,
}

impl Pool {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Transaction)> {
        self.transactions.iter()
    }
}

impl FromIterator<Transaction> for Pool {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self {
            transactions: iter.into_iter().map(|tx| (tx.id.clone(), tx)).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Pool {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // The backend has served the pool both as an id-keyed map and as a list.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Map(BTreeMap<String, Transaction>),
            List(Vec<Transaction>),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Map(transactions) => Pool { transactions },
            Wire::List(list) => list.into_iter().collect(),
        })
    }
}

/// Body of a transaction submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactRequest {
    pub recipient: String,
    pub amount: u64,
}

fn transactions_or_empty<'de, D>(deserializer: D) -> Result<Vec<Transaction>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(serde::de::Error::custom))
            .collect(),
        // Stubbed mine routes store a plain string as block data.
        _ => Ok(Vec::new()),
    }
}
