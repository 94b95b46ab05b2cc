//! Mirror Protocol CLI
//!
//! Execute and query the Mirror contracts from the terminal.

mod commands;
mod config;
mod context;
mod dispatch;
mod error;
mod menu;
mod output;

use tracing_subscriber::EnvFilter;

use crate::commands::CommandTable;
use crate::context::GlobalOptions;
use crate::error::CliError;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "MIRRORCLI_LOG";

fn init_logging(globals: &GlobalOptions) {
    let filter = if globals.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if globals.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

#[tokio::main]
async fn main() {
    let table = match CommandTable::init() {
        Ok(table) => table,
        Err(e) => std::process::exit(dispatch::report("mirrorcli", &CliError::from(e))),
    };

    let matches = table.cli().get_matches();
    let globals = GlobalOptions::from_matches(&matches);
    init_logging(&globals);

    let exit_code = dispatch::run(&table, &matches, &globals).await;
    std::process::exit(exit_code);
}
