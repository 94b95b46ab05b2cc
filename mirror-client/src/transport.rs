//! The seam between the CLI and the chain.

use async_trait::async_trait;
use mirror_core::{AccAddress, ExecuteMsg, QueryRequest};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::tx::StdTx;

/// A transaction to build and (unless `generate_only`) sign and broadcast.
#[derive(Debug, Clone, PartialEq)]
pub struct TxRequest {
    pub sender: AccAddress,
    pub msgs: Vec<ExecuteMsg>,
    pub memo: String,
    pub generate_only: bool,
}

/// Normalized result of a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub txhash: String,
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub height: u64,
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub gas_wanted: u64,
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub gas_used: u64,
    #[serde(default)]
    pub raw_log: String,
    #[serde(default)]
    pub logs: Value,
}

/// What `execute` produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TxOutcome {
    /// Signed, broadcast and included in a block.
    Confirmed(TxReceipt),
    /// Built but neither signed nor broadcast (`--generate-only`).
    Unsigned(StdTx),
}

/// Contract-interaction capability used by the dispatcher.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Run a smart query and return the contract's response unmodified.
    async fn query(&self, request: &QueryRequest) -> Result<Value>;

    /// Build, sign and broadcast a transaction, waiting for inclusion.
    async fn execute(&self, request: &TxRequest) -> Result<TxOutcome>;
}

/// LCD responses encode integers as either strings or numbers.
pub(crate) fn u64_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
