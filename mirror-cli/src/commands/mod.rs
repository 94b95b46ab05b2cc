//! Contract command tables.
//!
//! Each contract module exposes a `register` function that builds its exec
//! and query menus and hands them to the [`CommandTable`].

pub mod factory;
pub mod gov;
pub mod mint;
pub mod oracle;
pub mod staking;
pub mod token;

use clap::{ArgMatches, Command};
use mirror_core::{ExecuteMsg, QueryRequest};

use crate::context::GlobalOptions;
use crate::menu::{Args, CommandSpec, ExecMenu, MenuError, QueryMenu};

/// Name of the sub-command that holds a contract's query menu.
pub const QUERY: &str = "query";

/// The exec and query menus of one contract.
pub struct ContractMenus {
    pub exec: ExecMenu,
    pub query: QueryMenu,
}

/// Every registered command, for the lifetime of the process.
#[derive(Default)]
pub struct CommandTable {
    contracts: Vec<ContractMenus>,
}

/// A parsed command line, resolved to its command definition.
pub enum Invocation<'t> {
    Exec {
        menu: &'t ExecMenu,
        spec: &'t CommandSpec<ExecuteMsg>,
        args: Args,
    },
    Query {
        menu: &'t QueryMenu,
        spec: &'t CommandSpec<QueryRequest>,
        args: Args,
    },
}

impl CommandTable {
    /// Build the table with every contract registered.
    pub fn init() -> Result<Self, MenuError> {
        let mut table = Self::default();
        gov::register(&mut table)?;
        staking::register(&mut table)?;
        oracle::register(&mut table)?;
        token::register(&mut table)?;
        factory::register(&mut table)?;
        mint::register(&mut table)?;
        Ok(table)
    }

    pub fn register(&mut self, exec: ExecMenu, query: QueryMenu) -> Result<(), MenuError> {
        if exec.name() != query.name() {
            return Err(MenuError::MismatchedMenus {
                exec: exec.name(),
                query: query.name(),
            });
        }
        if self.find(exec.name()).is_some() {
            return Err(MenuError::DuplicateMenu(exec.name()));
        }
        if exec.find(QUERY).is_some() {
            return Err(MenuError::DuplicateCommand {
                menu: exec.name(),
                command: QUERY,
            });
        }
        self.contracts.push(ContractMenus { exec, query });
        Ok(())
    }

    pub fn find(&self, contract: &str) -> Option<&ContractMenus> {
        self.contracts.iter().find(|c| c.exec.name() == contract)
    }

    #[cfg(test)]
    pub fn contracts(&self) -> &[ContractMenus] {
        &self.contracts
    }

    /// The full clap command tree.
    pub fn cli(&self) -> Command {
        let root = Command::new("mirrorcli")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Command-line interface for the Mirror Protocol contracts")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .args(GlobalOptions::args());

        self.contracts.iter().fold(root, |root, menus| {
            root.subcommand(
                menus
                    .exec
                    .to_clap(menus.exec.name())
                    .subcommand(menus.query.to_clap(QUERY)),
            )
        })
    }

    /// Map clap's matches back to the command that declared them.
    pub fn resolve(&self, matches: &ArgMatches) -> Result<Invocation<'_>, MenuError> {
        let (contract, contract_matches) = matches.subcommand().ok_or(MenuError::Unmatched)?;
        let menus = self.find(contract).ok_or(MenuError::Unmatched)?;
        let (name, sub) = contract_matches.subcommand().ok_or(MenuError::Unmatched)?;

        if name == QUERY {
            let (name, sub) = sub.subcommand().ok_or(MenuError::Unmatched)?;
            let spec = menus.query.find(name).ok_or(MenuError::Unmatched)?;
            Ok(Invocation::Query {
                menu: &menus.query,
                spec,
                args: Args::from_matches(spec, sub),
            })
        } else {
            let spec = menus.exec.find(name).ok_or(MenuError::Unmatched)?;
            Ok(Invocation::Exec {
                menu: &menus.exec,
                spec,
                args: Args::from_matches(spec, sub),
            })
        }
    }
}
