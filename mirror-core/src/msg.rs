//! Call descriptions produced by the contract facades.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::types::{AccAddress, Coin};

/// A single state-mutating contract call, ready to be wrapped in a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteMsg {
    /// Contract to execute on.
    pub contract: AccAddress,
    /// JSON execute message.
    pub msg: Value,
    /// Native coins sent along with the call.
    #[serde(default)]
    pub coins: Vec<Coin>,
}

impl ExecuteMsg {
    pub fn new(contract: AccAddress, msg: Value) -> Self {
        Self {
            contract,
            msg,
            coins: Vec::new(),
        }
    }
}

/// A read-only smart query against a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub contract: AccAddress,
    pub msg: Value,
}

impl QueryRequest {
    pub fn new(contract: AccAddress, msg: Value) -> Self {
        Self { contract, msg }
    }
}

/// Encode a JSON message the way CosmWasm `Binary` fields expect it.
pub fn to_binary<T: Serialize>(msg: &T) -> Result<String> {
    let bytes = serde_json::to_vec(msg)?;
    Ok(STANDARD.encode(bytes))
}

/// Base64 of raw bytes, as used for user-supplied `--execute-msg` payloads.
pub fn encode_base64(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}
