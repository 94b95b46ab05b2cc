//! Global options and the per-invocation execution context.

use clap::{Arg, ArgAction, ArgMatches};
use mirror_client::{KeySigner, LcdConfig};
use mirror_core::{AccAddress, DecCoin, Mirror};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::output::OutputFormat;

pub const ENV_CONFIG: &str = "MIRRORCLI_CONFIG";
pub const ENV_LCD_URL: &str = "MIRRORCLI_LCD_URL";
pub const ENV_CHAIN_ID: &str = "MIRRORCLI_CHAIN_ID";
pub const ENV_SENDER: &str = "MIRRORCLI_SENDER";
pub const ENV_PRIVATE_KEY: &str = "MIRRORCLI_PRIVATE_KEY";

/// Flags accepted before or after any sub-command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub lcd_url: Option<String>,
    pub chain_id: Option<String>,
    pub output: OutputFormat,
    pub generate_only: bool,
    pub memo: Option<String>,
    pub verbose: bool,
    pub log_json: bool,
}

impl GlobalOptions {
    pub fn args() -> Vec<Arg> {
        vec![
            Arg::new("config")
                .long("config")
                .value_name("path")
                .global(true)
                .help("Config file [default: ~/.mirrorcli/config.toml]"),
            Arg::new("lcd-url")
                .long("lcd-url")
                .value_name("url")
                .global(true)
                .help("LCD endpoint to use"),
            Arg::new("chain-id")
                .long("chain-id")
                .value_name("id")
                .global(true)
                .help("Chain ID to sign for"),
            Arg::new("output")
                .long("output")
                .value_name("format")
                .value_parser(["json", "yaml"])
                .default_value("json")
                .global(true)
                .help("Output format"),
            Arg::new("generate-only")
                .long("generate-only")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Print the unsigned transaction instead of broadcasting"),
            Arg::new("memo")
                .long("memo")
                .value_name("text")
                .global(true)
                .help("Transaction memo"),
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Debug logging"),
            Arg::new("log-format")
                .long("log-format")
                .value_name("format")
                .value_parser(["text", "json"])
                .default_value("text")
                .global(true)
                .help("Log line format"),
        ]
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        let string = |id: &str| matches.get_one::<String>(id).cloned();
        Self {
            config: string("config").map(PathBuf::from),
            lcd_url: string("lcd-url"),
            chain_id: string("chain-id"),
            output: string("output")
                .as_deref()
                .and_then(OutputFormat::from_name)
                .unwrap_or_default(),
            generate_only: matches.get_flag("generate-only"),
            memo: string("memo"),
            verbose: matches.get_flag("verbose"),
            log_json: string("log-format").as_deref() == Some("json"),
        }
    }
}

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub lcd: LcdConfig,
    pub sender: Option<AccAddress>,
    pub signer: Option<KeySigner>,
    pub mirror: Mirror,
    pub memo: String,
    pub generate_only: bool,
}

impl ExecutionContext {
    /// Resolve from the process environment.
    pub fn resolve(globals: &GlobalOptions) -> Result<Self> {
        Self::resolve_with(globals, |key| std::env::var(key).ok())
    }

    /// Resolve with `env` standing in for the environment.
    ///
    /// Precedence is flag, then environment, then config file, then default.
    pub fn resolve_with<E>(globals: &GlobalOptions, env: E) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let config = match globals.config.clone().or_else(|| env(ENV_CONFIG).map(PathBuf::from)) {
            Some(path) => CliConfig::load(&path)?,
            None => CliConfig::load_default()?,
        };
        Self::from_config(config, globals, env)
    }

    pub fn from_config<E>(config: CliConfig, globals: &GlobalOptions, env: E) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let network = config.network;
        let gas_price: DecCoin = network
            .gas_prices
            .parse()
            .map_err(|e| CliError::Config(format!("[network].gas_prices: {}", e)))?;

        let lcd = LcdConfig {
            url: globals
                .lcd_url
                .clone()
                .or_else(|| env(ENV_LCD_URL))
                .unwrap_or(network.lcd_url),
            chain_id: globals
                .chain_id
                .clone()
                .or_else(|| env(ENV_CHAIN_ID))
                .unwrap_or(network.chain_id),
            gas: network.gas,
            gas_price,
            timeout: Duration::from_secs(network.timeout_secs),
        };

        let sender = match env(ENV_SENDER) {
            Some(raw) => Some(AccAddress::new(&raw)?),
            None => config.signer.address,
        };

        if config.signer.private_key.is_some() && config.signer.private_key_file.is_some() {
            warn!("both private_key and private_key_file are set; using private_key");
        }
        let key = match (env(ENV_PRIVATE_KEY), config.signer.private_key, config.signer.private_key_file) {
            (Some(key), _, _) | (None, Some(key), _) => Some(key),
            (None, None, Some(path)) => Some(
                std::fs::read_to_string(&path)
                    .map_err(|e| CliError::Config(format!("cannot read {}: {}", path.display(), e)))?,
            ),
            (None, None, None) => None,
        };
        let signer = key
            .map(|k| KeySigner::from_hex(k.trim()))
            .transpose()
            .map_err(|e| CliError::Config(format!("invalid private key: {}", e)))?;

        debug!(lcd = %lcd.url, chain_id = %lcd.chain_id, has_key = signer.is_some(), "context resolved");

        Ok(Self {
            lcd,
            sender,
            signer,
            mirror: Mirror::new(config.contracts),
            memo: globals.memo.clone().unwrap_or_default(),
            generate_only: globals.generate_only,
        })
    }

    /// The account transactions are sent from, checked for signability.
    pub fn signing_sender(&self) -> Result<&AccAddress> {
        let sender = self.sender.as_ref().ok_or(CliError::MissingSender)?;
        if !self.generate_only && self.signer.is_none() {
            return Err(mirror_client::ClientError::MissingSigner.into());
        }
        Ok(sender)
    }
}
