//! Error types for the network layer.

use mirror_core::MirrorError;
use thiserror::Error;

/// Errors raised while talking to the chain.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, timeout).
    #[error("network error: {0}")]
    Http(String),

    /// The LCD answered with a non-success status.
    #[error("LCD returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error text extracted from the response body
        message: String,
    },

    /// The transaction was included but failed during execution.
    #[error("transaction rejected (code {code}): {raw_log}")]
    Rejected {
        /// Non-zero ABCI result code
        code: u32,
        /// Raw log explaining the failure
        raw_log: String,
    },

    /// No key is available to sign with.
    #[error("no private key configured; set [signer].private_key or MIRRORCLI_PRIVATE_KEY, or use --generate-only")]
    MissingSigner,

    /// Key material could not be loaded or used.
    #[error("signing error: {0}")]
    Signing(String),

    /// The LCD response did not have the expected shape.
    #[error("unexpected LCD response: {0}")]
    InvalidResponse(String),

    /// Error from mirror-core.
    #[error(transparent)]
    Core(#[from] MirrorError),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::InvalidResponse(e.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
