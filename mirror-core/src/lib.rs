//! # Mirror Core
//!
//! Input parsing, domain types and contract message builders for `mirrorcli`.
//!
//! Nothing in this crate touches the network. Every contract method returns a
//! description of the call ([`ExecuteMsg`] or [`QueryRequest`]) which a
//! transport later submits.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mirror_core::{parse, ContractAddresses, Mirror};
//!
//! let addresses = ContractAddresses {
//!     gov: Some(parse::acc_address("terra1qyqszqgpqyqszqgpqyqszqgpqyqszqgp5hm70u").unwrap()),
//!     ..Default::default()
//! };
//! let mirror = Mirror::new(addresses);
//!
//! let query = mirror.gov().unwrap().get_poll(5).unwrap();
//! assert_eq!(query.msg["poll"]["poll_id"], 5);
//! ```

pub mod contracts;
pub mod error;
pub mod msg;
pub mod parse;
pub mod types;

// Re-export main types for convenience
pub use contracts::{ContractAddresses, Mirror};
pub use error::{MirrorError, Result};
pub use msg::{ExecuteMsg, QueryRequest};
pub use types::{
    AccAddress, Asset, AssetInfo, Coin, DecCoin, Decimal, OrderBy, PollStatus, Uint128, VoteOption,
};
