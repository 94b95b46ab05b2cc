//! Terminal output formatting.
//!
//! Payloads go to stdout. Status lines go to stderr so stdout stays parseable.

use colored::Colorize;
use serde::Serialize;

use crate::error::{CliError, Result};

/// How structured payloads are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(OutputFormat::Json),
            "yaml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }

    pub fn render<T: Serialize>(self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => serde_json::to_string_pretty(value)
                .map_err(|e| CliError::Config(format!("cannot render output: {}", e))),
            OutputFormat::Yaml => serde_yaml::to_string(value)
                .map(|s| s.trim_end().to_string())
                .map_err(|e| CliError::Config(format!("cannot render output: {}", e))),
        }
    }
}

/// Print a rendered payload to stdout, undecorated.
pub fn payload<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    println!("{}", format.render(value)?);
    Ok(())
}

/// Print a success message.
pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green().bold(), msg.green());
}

/// Print an error message to stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

/// Print an info message.
pub fn info(msg: &str) {
    eprintln!("{} {}", "→".cyan(), msg);
}

/// Print a helpful hint to stderr.
pub fn hint(msg: &str) {
    eprintln!("{} {}", "hint:".dimmed(), msg.dimmed());
}
