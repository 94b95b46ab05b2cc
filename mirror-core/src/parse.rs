//! Conversion of raw command-line tokens into typed values.
//!
//! Every function is pure and total for well-formed input. Absent optional
//! values are handled by [`optional`], which passes `None` through untouched
//! so that optional options stay optional all the way to the contract message.

use std::num::ParseIntError;
use std::str::FromStr;

use crate::error::{MirrorError, Result};
use crate::types::{AccAddress, Asset, AssetInfo, Decimal, Uint128};

/// Parse a bech32 account address.
pub fn acc_address(raw: &str) -> Result<AccAddress> {
    AccAddress::new(raw)
}

/// Parse a base-10 integer of any primitive width.
///
/// Fails with `InvalidInteger` on non-numeric input or when the value does not
/// fit in `T` (which includes negative values for unsigned `T`).
pub fn int<T>(raw: &str) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    raw.parse::<T>()
        .map_err(|_| MirrorError::InvalidInteger(raw.to_string()))
}

/// Parse an unsigned 128-bit token amount.
pub fn uint128(raw: &str) -> Result<Uint128> {
    raw.parse()
}

/// Parse a decimal ratio or percentage.
pub fn dec(raw: &str) -> Result<Decimal> {
    raw.parse()
}

/// Parse an asset amount such as `1000000uusd` or `1000000terra1...`.
pub fn asset(raw: &str) -> Result<Asset> {
    raw.parse()
}

/// Parse an asset kind: a `terra1...` token address or a native denom.
pub fn asset_info(raw: &str) -> Result<AssetInfo> {
    raw.parse()
}

/// Parse a JSON message supplied on the command line.
pub fn json(raw: &str) -> Result<serde_json::Value> {
    serde_json::from_str(raw).map_err(|_| MirrorError::InvalidJson(raw.to_string()))
}

/// Apply `parser` to a value that may be absent.
///
/// ```
/// use mirror_core::parse;
///
/// assert_eq!(parse::optional(None, parse::int::<u64>).unwrap(), None);
/// assert_eq!(parse::optional(Some("7"), parse::int::<u64>).unwrap(), Some(7));
/// ```
pub fn optional<T, F>(raw: Option<&str>, parser: F) -> Result<Option<T>>
where
    F: FnOnce(&str) -> Result<T>,
{
    raw.map(parser).transpose()
}
