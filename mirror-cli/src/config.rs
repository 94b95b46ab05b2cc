//! Configuration file.
//!
//! Read from `~/.mirrorcli/config.toml` unless another path is given. Every
//! section is optional; absent values fall back to the public mainnet LCD.

use mirror_core::{AccAddress, ContractAddresses};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CliError, Result};

pub const DEFAULT_LCD_URL: &str = "https://lcd.terra.dev";
pub const DEFAULT_CHAIN_ID: &str = "columbus-4";
pub const DEFAULT_GAS: u64 = 1_000_000;
pub const DEFAULT_GAS_PRICES: &str = "0.15uusd";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub network: NetworkConfig,
    pub signer: SignerConfig,
    pub contracts: ContractAddresses,
}

/// `[network]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    pub lcd_url: String,
    pub chain_id: String,
    /// Gas limit per transaction.
    pub gas: u64,
    /// Price per unit of gas, e.g. `0.15uusd`.
    pub gas_prices: String,
    pub timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            lcd_url: DEFAULT_LCD_URL.to_string(),
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            gas: DEFAULT_GAS,
            gas_prices: DEFAULT_GAS_PRICES.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[signer]` section.
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignerConfig {
    pub address: Option<AccAddress>,
    /// Hex-encoded secp256k1 secret key.
    pub private_key: Option<String>,
    /// File holding the hex key.
    pub private_key_file: Option<PathBuf>,
}

impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfig")
            .field("address", &self.address)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("private_key_file", &self.private_key_file)
            .finish()
    }
}

impl CliConfig {
    /// `~/.mirrorcli/config.toml`, if a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".mirrorcli").join("config.toml"))
    }

    /// Load an explicitly named file; a missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::parse(&text).map_err(|e| match e {
            CliError::Config(msg) => CliError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Load the default file, or defaults when it does not exist.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CliError::Config(e.message().to_string()))
    }
}
