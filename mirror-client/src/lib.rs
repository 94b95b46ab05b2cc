//! # Mirror Client
//!
//! Network layer for `mirrorcli`: smart queries, account lookup, amino-JSON
//! transaction signing and broadcast against a legacy LCD REST endpoint.
//!
//! The CLI only sees the [`Transport`] trait, so tests can swap
//! [`LcdClient`] for an in-memory double.

pub mod error;
pub mod lcd;
pub mod signer;
pub mod transport;
pub mod tx;

// Re-export main types for convenience
pub use error::ClientError;
pub use lcd::{LcdClient, LcdConfig};
pub use signer::KeySigner;
pub use transport::{Transport, TxOutcome, TxReceipt, TxRequest};
pub use tx::{StdFee, StdTx};
