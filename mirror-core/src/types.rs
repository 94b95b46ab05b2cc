//! Domain types shared by every contract facade.
//!
//! Amounts and decimals serialize as JSON strings, matching the CosmWasm
//! `Uint128` and `Decimal` wire format.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{MirrorError, Result};

/// Human-readable prefix of account addresses on the target chain.
pub const ACCOUNT_PREFIX: &str = "terra";

/// Bech32 data symbols for a 20-byte address.
const ADDRESS_DATA_LEN: usize = 32;

/// Bech32 checksum length in symbols.
const CHECKSUM_LEN: usize = 6;

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const GENERATOR: [u32; 5] = [0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3];

/// A validated bech32 account address (`terra1...`).
///
/// Validation is structural only: prefix, length, charset and checksum.
/// Whether the account exists on chain is not checked. The address keeps the
/// exact text it was parsed from, so an all-upper-case input stays upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccAddress(String);

impl AccAddress {
    /// Validate and wrap a raw address string.
    pub fn new(raw: &str) -> Result<Self> {
        let invalid = || MirrorError::InvalidAddress(raw.to_string());

        let has_lower = raw.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = raw.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper {
            return Err(invalid());
        }

        let lower = raw.to_ascii_lowercase();
        let (hrp, data) = lower.rsplit_once('1').ok_or_else(invalid)?;
        if hrp != ACCOUNT_PREFIX || data.len() != ADDRESS_DATA_LEN + CHECKSUM_LEN {
            return Err(invalid());
        }

        let values = data
            .bytes()
            .map(|b| CHARSET.iter().position(|&c| c == b).map(|p| p as u8))
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(invalid)?;

        if polymod(hrp_expand(hrp).chain(values)) != 1 {
            return Err(invalid());
        }

        Ok(Self(raw.to_string()))
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn hrp_expand(hrp: &str) -> impl Iterator<Item = u8> + '_ {
    hrp.bytes()
        .map(|b| b >> 5)
        .chain(std::iter::once(0))
        .chain(hrp.bytes().map(|b| b & 0x1f))
}

fn polymod(values: impl Iterator<Item = u8>) -> u32 {
    let mut chk: u32 = 1;
    for v in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ u32::from(v);
        for (i, g) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= g;
            }
        }
    }
    chk
}

impl FromStr for AccAddress {
    type Err = MirrorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccAddress {
    type Error = MirrorError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<AccAddress> for String {
    fn from(addr: AccAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Unsigned 128-bit token amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint128(pub u128);

impl Uint128 {
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn u128(self) -> u128 {
        self.0
    }
}

impl From<u128> for Uint128 {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl FromStr for Uint128 {
    type Err = MirrorError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MirrorError::InvalidAmount(s.to_string()));
        }
        s.parse::<u128>()
            .map(Self)
            .map_err(|_| MirrorError::InvalidAmount(s.to_string()))
    }
}

impl fmt::Display for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Uint128 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Uint128 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Number of fractional digits carried by [`Decimal`].
pub const DECIMAL_PLACES: u32 = 18;

const DECIMAL_FRACTIONAL: u128 = 1_000_000_000_000_000_000;

/// Non-negative fixed-point decimal with 18 fractional digits.
///
/// Displays in minimal form: `"0.1"`, `"10"`, never `"10.000"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(u128);

impl Decimal {
    /// Build from raw atomics (value × 10^18).
    pub const fn from_atomics(atomics: u128) -> Self {
        Self(atomics)
    }

    pub const fn atomics(self) -> u128 {
        self.0
    }

    /// `ceil(self × rhs)`, or `None` on overflow.
    pub fn checked_mul_ceil(self, rhs: u128) -> Option<u128> {
        let product = self.0.checked_mul(rhs)?;
        let whole = product / DECIMAL_FRACTIONAL;
        if product % DECIMAL_FRACTIONAL == 0 {
            Some(whole)
        } else {
            whole.checked_add(1)
        }
    }
}

impl FromStr for Decimal {
    type Err = MirrorError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MirrorError::InvalidDecimal(s.to_string());
        let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

        let (whole, fraction) = match s.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (s, None),
        };

        if !is_digits(whole) {
            return Err(invalid());
        }
        let mut atomics = whole
            .parse::<u128>()
            .ok()
            .and_then(|w| w.checked_mul(DECIMAL_FRACTIONAL))
            .ok_or_else(invalid)?;

        if let Some(fraction) = fraction {
            if !is_digits(fraction) || fraction.len() > DECIMAL_PLACES as usize {
                return Err(invalid());
            }
            let padded = format!("{:0<width$}", fraction, width = DECIMAL_PLACES as usize);
            let fractional = padded.parse::<u128>().map_err(|_| invalid())?;
            atomics = atomics.checked_add(fractional).ok_or_else(invalid)?;
        }

        Ok(Self(atomics))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / DECIMAL_FRACTIONAL;
        let fractional = self.0 % DECIMAL_FRACTIONAL;
        if fractional == 0 {
            write!(f, "{}", whole)
        } else {
            let digits = format!("{:018}", fractional);
            write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
        }
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A native coin amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Uint128,
}

impl Coin {
    pub fn new(amount: u128, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: Uint128(amount),
        }
    }
}

/// A decimal coin amount, used for gas prices (`0.15uusd`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecCoin {
    pub denom: String,
    pub amount: Decimal,
}

impl FromStr for DecCoin {
    type Err = MirrorError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MirrorError::InvalidCoin(s.to_string());
        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        let (amount, denom) = s.split_at(split);

        let denom_ok = denom.starts_with(|c: char| c.is_ascii_alphabetic())
            && denom.chars().all(|c| c.is_ascii_alphanumeric() || c == '/');
        if !denom_ok {
            return Err(invalid());
        }

        Ok(Self {
            denom: denom.to_string(),
            amount: amount.parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Either a CW20 token or a native coin denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetInfo {
    Token { contract_addr: AccAddress },
    NativeToken { denom: String },
}

impl AssetInfo {
    pub fn is_native(&self) -> bool {
        matches!(self, AssetInfo::NativeToken { .. })
    }
}

impl FromStr for AssetInfo {
    type Err = MirrorError;

    /// `terra1...` names a token contract; anything else must be a denom.
    fn from_str(s: &str) -> Result<Self> {
        if s.to_ascii_lowercase().starts_with(ACCOUNT_PREFIX) {
            return Ok(AssetInfo::Token {
                contract_addr: AccAddress::new(s)?,
            });
        }
        let denom_ok = s.starts_with(|c: char| c.is_ascii_alphabetic())
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '/');
        if !denom_ok {
            return Err(MirrorError::InvalidAsset(s.to_string()));
        }
        Ok(AssetInfo::NativeToken {
            denom: s.to_string(),
        })
    }
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetInfo::Token { contract_addr } => write!(f, "{}", contract_addr),
            AssetInfo::NativeToken { denom } => f.write_str(denom),
        }
    }
}

/// An amount of some [`AssetInfo`], written `1000000uusd` or
/// `1000000terra1...` on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub info: AssetInfo,
    pub amount: Uint128,
}

impl FromStr for Asset {
    type Err = MirrorError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MirrorError::InvalidAsset(s.to_string());
        let split = s.find(|c: char| !c.is_ascii_digit()).ok_or_else(invalid)?;
        let (amount, info) = s.split_at(split);
        Ok(Self {
            amount: amount.parse().map_err(|_| invalid())?,
            info: info.parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.info)
    }
}

fn parse_choice<T: Copy>(
    what: &'static str,
    raw: &str,
    allowed: &'static [&'static str],
    variants: &[T],
) -> Result<T> {
    allowed
        .iter()
        .position(|a| *a == raw)
        .map(|i| variants[i])
        .ok_or_else(|| MirrorError::InvalidChoice {
            what,
            value: raw.to_string(),
            allowed,
        })
}

/// Ballot choice in a governance poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOption {
    Yes,
    No,
}

impl VoteOption {
    pub const ALLOWED: &'static [&'static str] = &["yes", "no"];
}

impl FromStr for VoteOption {
    type Err = MirrorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_choice("vote option", s, Self::ALLOWED, &[VoteOption::Yes, VoteOption::No])
    }
}

/// Lifecycle state of a governance poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStatus {
    InProgress,
    Passed,
    Rejected,
    Executed,
    Expired,
}

impl PollStatus {
    /// States accepted as a poll-query filter. `expired` is not filterable.
    pub const FILTERS: &'static [&'static str] = &["in_progress", "passed", "rejected", "executed"];

    /// Parse a poll-query filter value.
    pub fn parse_filter(raw: &str) -> Result<Self> {
        parse_choice(
            "filter",
            raw,
            Self::FILTERS,
            &[
                PollStatus::InProgress,
                PollStatus::Passed,
                PollStatus::Rejected,
                PollStatus::Executed,
            ],
        )
    }
}

/// Sort order for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    Asc,
    Desc,
}

impl OrderBy {
    pub const ALLOWED: &'static [&'static str] = &["asc", "desc"];
}

impl FromStr for OrderBy {
    type Err = MirrorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_choice("order", s, Self::ALLOWED, &[OrderBy::Asc, OrderBy::Desc])
    }
}
