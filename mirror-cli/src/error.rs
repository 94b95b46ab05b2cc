//! CLI error types.

use mirror_client::ClientError;
use mirror_core::MirrorError;
use thiserror::Error;

use crate::menu::MenuError;

/// Anything that can make a command fail.
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed input, an invalid choice, or inconsistent options.
    #[error(transparent)]
    Input(#[from] MirrorError),

    /// Transport, signing or contract failure.
    #[error(transparent)]
    Remote(#[from] ClientError),

    #[error("missing required argument '{0}'")]
    MissingArgument(&'static str),

    #[error("no sender address configured")]
    MissingSender,

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Menu(#[from] MenuError),
}

/// Coarse error classes used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Precondition,
    Context,
    Remote,
}

impl CliError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CliError::Input(e) if e.is_precondition() => ErrorKind::Precondition,
            CliError::Input(MirrorError::MissingContract(_)) => ErrorKind::Context,
            CliError::Input(_) | CliError::MissingArgument(_) => ErrorKind::Validation,
            CliError::Remote(ClientError::MissingSigner) => ErrorKind::Context,
            CliError::Remote(_) => ErrorKind::Remote,
            CliError::MissingSender | CliError::Config(_) | CliError::Menu(_) => ErrorKind::Context,
        }
    }

    /// A follow-up suggestion printed under the error, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::MissingSender => {
                Some("Set [signer].address in the config file or MIRRORCLI_SENDER.")
            }
            CliError::Input(MirrorError::MissingContract(_)) => {
                Some("Add the address under [contracts] in the config file.")
            }
            CliError::Remote(ClientError::Http(_)) => {
                Some("Check --lcd-url or [network].lcd_url.")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
