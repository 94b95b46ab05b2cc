//! Error types for the Mirror core library.
//!
//! Everything here is raised locally, before any network interaction:
//! malformed input, enumerated values outside their allowed set, and
//! inconsistent option combinations.

use thiserror::Error;

/// Errors that can occur while turning user input into contract calls.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MirrorError {
    /// Malformed account address.
    #[error("invalid address '{0}': expected a bech32 'terra1...' account address")]
    InvalidAddress(String),

    /// Non-numeric or out-of-range integer.
    #[error("invalid integer '{0}'")]
    InvalidInteger(String),

    /// Negative or non-numeric token amount.
    #[error("invalid amount '{0}': expected a non-negative integer (Uint128)")]
    InvalidAmount(String),

    /// Malformed decimal value.
    #[error("invalid decimal '{0}'")]
    InvalidDecimal(String),

    /// Malformed JSON message.
    #[error("invalid JSON message '{0}'")]
    InvalidJson(String),

    /// Malformed coin such as a gas price.
    #[error("invalid coin '{0}': expected <amount><denom>, e.g. 0.15uusd")]
    InvalidCoin(String),

    /// Malformed asset amount such as position collateral.
    #[error("invalid asset '{0}': expected <amount><denom> or <amount><token address>, e.g. 1000000uusd")]
    InvalidAsset(String),

    /// Enumerated value outside its allowed set.
    #[error("invalid {what} '{value}'; MUST be one of: {}", quoted(.allowed))]
    InvalidChoice {
        /// Name of the value being checked (e.g. "vote option")
        what: &'static str,
        /// The rejected value
        value: String,
        /// Accepted values
        allowed: &'static [&'static str],
    },

    /// Mutually dependent inputs supplied inconsistently.
    #[error("{0}")]
    Precondition(String),

    /// The contract address needed by a command is not configured.
    #[error("no address configured for the '{0}' contract")]
    MissingContract(&'static str),

    /// A message could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl MirrorError {
    /// Whether the error is a precondition failure rather than malformed input.
    pub fn is_precondition(&self) -> bool {
        matches!(self, MirrorError::Precondition(_))
    }
}

impl From<serde_json::Error> for MirrorError {
    fn from(e: serde_json::Error) -> Self {
        MirrorError::Serialization(e.to_string())
    }
}

fn quoted(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, MirrorError>;
