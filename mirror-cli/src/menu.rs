//! Command menus.
//!
//! Every contract gets two menus: an exec menu (signed, broadcast calls) and
//! a query menu (read-only calls). Sub-commands are declared with a fluent
//! builder and rendered into a `clap::Command` tree. Handlers never see the
//! builder: they receive an immutable [`Args`] record assembled after clap
//! has finished parsing.

use clap::{Arg, ArgAction, ArgMatches, Command};
use mirror_core::{ExecuteMsg, Mirror, MirrorError, QueryRequest};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::error::CliError;

/// Argument names owned by the root command and propagated to every sub-command.
pub const RESERVED_NAMES: &[&str] = &[
    "config",
    "lcd-url",
    "chain-id",
    "output",
    "generate-only",
    "memo",
    "verbose",
    "log-format",
    "help",
    "version",
];

/// Errors in command declarations. These are programming errors surfaced at
/// startup, before any argument is parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("malformed usage pattern '{0}'")]
    MalformedUsage(&'static str),

    #[error("malformed option pattern '{0}': expected '--name <placeholder>'")]
    MalformedOption(&'static str),

    #[error("duplicate command '{command}' in menu '{menu}'")]
    DuplicateCommand {
        menu: &'static str,
        command: &'static str,
    },

    #[error("duplicate argument '{argument}' in command '{command}'")]
    DuplicateArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("argument name '{argument}' in command '{command}' is reserved for global options")]
    ReservedArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{argument}' is not declared by command '{command}'")]
    UnknownArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("menu '{0}' is registered twice")]
    DuplicateMenu(&'static str),

    #[error("exec and query menus disagree on contract name: '{exec}' vs '{query}'")]
    MismatchedMenus {
        exec: &'static str,
        query: &'static str,
    },

    #[error("no command matches the parsed arguments")]
    Unmatched,
}

/// Handler producing a call description from parsed arguments.
///
/// Synchronous: building a message needs no I/O. The dispatcher owns the one
/// network round trip.
pub type Handler<R> = Box<dyn Fn(&Args, &Mirror) -> Result<R, CliError> + Send + Sync>;

/// A positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positional {
    pub name: &'static str,
    pub required: bool,
    pub help: Option<&'static str>,
}

/// A `--flag <placeholder>` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub long: &'static str,
    pub placeholder: &'static str,
    pub help: &'static str,
    pub required: bool,
}

/// A registered sub-command and its single handler.
pub struct CommandSpec<R> {
    pub name: &'static str,
    pub about: &'static str,
    pub positionals: Vec<Positional>,
    pub options: Vec<OptionSpec>,
    /// Options that must be given together or not at all.
    pub pairs: Vec<(&'static str, &'static str)>,
    handler: Handler<R>,
}

impl<R> CommandSpec<R> {
    /// Check cross-option constraints, then run the handler.
    pub fn invoke(&self, args: &Args, mirror: &Mirror) -> Result<R, CliError> {
        for (a, b) in &self.pairs {
            if args.get(a).is_some() != args.get(b).is_some() {
                return Err(MirrorError::Precondition(format!(
                    "both --{} and --{} must be supplied if either is",
                    a, b
                ))
                .into());
            }
        }
        (self.handler)(args, mirror)
    }

    fn to_clap(&self) -> Command {
        let mut cmd = Command::new(self.name).about(self.about);
        for p in &self.positionals {
            let mut arg = Arg::new(p.name)
                .value_name(p.name)
                .required(p.required)
                .action(ArgAction::Set);
            if let Some(help) = p.help {
                arg = arg.help(help);
            }
            cmd = cmd.arg(arg);
        }
        for o in &self.options {
            cmd = cmd.arg(
                Arg::new(o.long)
                    .long(o.long)
                    .value_name(o.placeholder)
                    .help(o.help)
                    .required(o.required)
                    .action(ArgAction::Set),
            );
        }
        cmd
    }

    fn argument_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.positionals
            .iter()
            .map(|p| p.name)
            .chain(self.options.iter().map(|o| o.long))
    }
}

impl<R> std::fmt::Debug for CommandSpec<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("positionals", &self.positionals)
            .field("options", &self.options)
            .field("pairs", &self.pairs)
            .finish_non_exhaustive()
    }
}

/// Parsed argument values for one invocation, keyed by declared name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    values: BTreeMap<&'static str, String>,
}

impl Args {
    /// Collect the values `spec` declares from clap's matches.
    pub fn from_matches<R>(spec: &CommandSpec<R>, matches: &ArgMatches) -> Self {
        let values = spec
            .argument_names()
            .filter_map(|name| matches.get_one::<String>(name).map(|v| (name, v.clone())))
            .collect();
        Self { values }
    }

    /// Build directly from name/value pairs.
    pub fn from_pairs(pairs: &[(&'static str, &str)]) -> Self {
        Self {
            values: pairs.iter().map(|(k, v)| (*k, v.to_string())).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// A value clap already guarantees to be present.
    pub fn required(&self, name: &'static str) -> Result<&str, CliError> {
        self.get(name).ok_or(CliError::MissingArgument(name))
    }
}

/// A named group of sub-commands for one contract.
pub struct Menu<R> {
    name: &'static str,
    about: &'static str,
    commands: Vec<CommandSpec<R>>,
}

pub type ExecMenu = Menu<ExecuteMsg>;
pub type QueryMenu = Menu<QueryRequest>;

/// Create the exec menu of a contract.
pub fn create_exec_menu(name: &'static str, about: &'static str) -> ExecMenu {
    Menu::new(name, about)
}

/// Create the query menu of a contract.
pub fn create_query_menu(name: &'static str, about: &'static str) -> QueryMenu {
    Menu::new(name, about)
}

impl<R> Menu<R> {
    fn new(name: &'static str, about: &'static str) -> Self {
        Self {
            name,
            about,
            commands: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    #[cfg(test)]
    pub fn commands(&self) -> &[CommandSpec<R>] {
        &self.commands
    }

    pub fn find(&self, name: &str) -> Option<&CommandSpec<R>> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Start declaring a sub-command from a usage pattern such as
    /// `"cast-vote <poll-id> <vote-option> <amount>"`.
    pub fn command(&mut self, usage: &'static str) -> CommandBuilder<'_, R> {
        CommandBuilder {
            menu: self,
            usage,
            about: "",
            arg_help: Vec::new(),
            options: Vec::new(),
            pairs: Vec::new(),
        }
    }

    /// Render the menu as a clap command with one sub-command per spec.
    pub fn to_clap(&self, name: &'static str) -> Command {
        self.commands.iter().fold(
            Command::new(name)
                .about(self.about)
                .subcommand_required(true)
                .arg_required_else_help(true),
            |cmd, spec| cmd.subcommand(spec.to_clap()),
        )
    }
}

/// Fluent declaration of one sub-command. Nothing is registered until
/// [`CommandBuilder::action`] supplies the handler.
pub struct CommandBuilder<'m, R> {
    menu: &'m mut Menu<R>,
    usage: &'static str,
    about: &'static str,
    arg_help: Vec<(&'static str, &'static str)>,
    options: Vec<(&'static str, &'static str, bool)>,
    pairs: Vec<(&'static str, &'static str)>,
}

impl<'m, R> CommandBuilder<'m, R> {
    pub fn description(mut self, about: &'static str) -> Self {
        self.about = about;
        self
    }

    /// Explain one positional argument in the help output.
    pub fn describe_arg(mut self, name: &'static str, help: &'static str) -> Self {
        self.arg_help.push((name, help));
        self
    }

    pub fn option(mut self, pattern: &'static str, help: &'static str) -> Self {
        self.options.push((pattern, help, false));
        self
    }

    pub fn required_option(mut self, pattern: &'static str, help: &'static str) -> Self {
        self.options.push((pattern, help, true));
        self
    }

    /// Require `a` and `b` (option names without dashes) to be supplied together.
    pub fn paired_options(mut self, a: &'static str, b: &'static str) -> Self {
        self.pairs.push((a, b));
        self
    }

    /// Attach the handler and register the command.
    pub fn action<F>(self, handler: F) -> Result<(), MenuError>
    where
        F: Fn(&Args, &Mirror) -> Result<R, CliError> + Send + Sync + 'static,
    {
        let (name, mut positionals) = parse_usage(self.usage)?;

        for &(arg, help) in &self.arg_help {
            let positional = positionals
                .iter_mut()
                .find(|p| p.name == arg)
                .ok_or(MenuError::UnknownArgument {
                    command: name,
                    argument: arg,
                })?;
            positional.help = Some(help);
        }

        let options = self
            .options
            .iter()
            .map(|&(pattern, help, required)| {
                let (long, placeholder) = parse_option(pattern)?;
                Ok(OptionSpec {
                    long,
                    placeholder,
                    help,
                    required,
                })
            })
            .collect::<Result<Vec<_>, MenuError>>()?;

        let spec = CommandSpec {
            name,
            about: self.about,
            positionals,
            options,
            pairs: self.pairs,
            handler: Box::new(handler),
        };
        validate_names(&spec)?;

        if self.menu.find(name).is_some() {
            return Err(MenuError::DuplicateCommand {
                menu: self.menu.name,
                command: name,
            });
        }
        self.menu.commands.push(spec);
        Ok(())
    }
}

fn validate_names<R>(spec: &CommandSpec<R>) -> Result<(), MenuError> {
    let mut seen = Vec::new();
    for argument in spec.argument_names() {
        if RESERVED_NAMES.contains(&argument) {
            return Err(MenuError::ReservedArgument {
                command: spec.name,
                argument,
            });
        }
        if seen.contains(&argument) {
            return Err(MenuError::DuplicateArgument {
                command: spec.name,
                argument,
            });
        }
        seen.push(argument);
    }
    for (a, b) in &spec.pairs {
        for argument in [*a, *b] {
            if !spec.options.iter().any(|o| o.long == argument) {
                return Err(MenuError::UnknownArgument {
                    command: spec.name,
                    argument,
                });
            }
        }
    }
    Ok(())
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Split `"name <req> [opt]"` into the command name and its positionals.
fn parse_usage(usage: &'static str) -> Result<(&'static str, Vec<Positional>), MenuError> {
    let mut tokens = usage.split_whitespace();
    let name = tokens
        .next()
        .filter(|n| is_identifier(n))
        .ok_or(MenuError::MalformedUsage(usage))?;

    let mut positionals: Vec<Positional> = Vec::new();
    for token in tokens {
        let (inner, required) = if let Some(inner) = token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            (inner, true)
        } else if let Some(inner) = token.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            (inner, false)
        } else {
            return Err(MenuError::MalformedUsage(usage));
        };

        if !is_identifier(inner) {
            return Err(MenuError::MalformedUsage(usage));
        }
        // a required positional cannot follow an optional one
        if required && positionals.iter().any(|p| !p.required) {
            return Err(MenuError::MalformedUsage(usage));
        }
        positionals.push(Positional {
            name: inner,
            required,
            help: None,
        });
    }

    Ok((name, positionals))
}

/// Split `"--name <placeholder>"`.
fn parse_option(pattern: &'static str) -> Result<(&'static str, &'static str), MenuError> {
    let malformed = || MenuError::MalformedOption(pattern);
    let mut tokens = pattern.split_whitespace();

    let long = tokens
        .next()
        .and_then(|t| t.strip_prefix("--"))
        .filter(|l| is_identifier(l))
        .ok_or_else(malformed)?;
    let placeholder = tokens
        .next()
        .and_then(|t| t.strip_prefix('<'))
        .and_then(|t| t.strip_suffix('>'))
        .filter(|p| !p.is_empty())
        .ok_or_else(malformed)?;

    if tokens.next().is_some() {
        return Err(malformed());
    }
    Ok((long, placeholder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_core::{parse, AccAddress};
    use serde_json::json;

    const GOV: &str = "terra1qyqszqgpqyqszqgpqyqszqgpqyqszqgp5hm70u";

    fn noop(_: &Args, _: &Mirror) -> Result<QueryRequest, CliError> {
        Ok(QueryRequest::new(AccAddress::new(GOV).unwrap(), json!({})))
    }

    #[test]
    fn test_usage_pattern_parsing() {
        let (name, positionals) = parse_usage("cast-vote <poll-id> <vote-option> [amount]").unwrap();
        assert_eq!(name, "cast-vote");
        assert_eq!(positionals.len(), 3);
        assert!(positionals[0].required);
        assert!(!positionals[2].required);

        assert!(parse_usage("").is_err());
        assert!(parse_usage("x [a] <b>").is_err());
        assert!(parse_usage("x <>").is_err());
        assert!(parse_usage("x a").is_err());
    }

    #[test]
    fn test_option_pattern_parsing() {
        assert_eq!(
            parse_option("--execute-to <AccAddress>").unwrap(),
            ("execute-to", "AccAddress")
        );
        assert!(parse_option("-x <int>").is_err());
        assert!(parse_option("--limit").is_err());
        assert!(parse_option("--limit <int> extra").is_err());
    }

    #[test]
    fn test_registration_and_lookup() {
        let mut menu = create_query_menu("gov", "Gov queries");
        menu.command("poll <poll-id>")
            .description("Query poll")
            .describe_arg("poll-id", "(int) Poll ID")
            .action(noop)
            .unwrap();

        let spec = menu.find("poll").unwrap();
        assert_eq!(spec.positionals[0].help, Some("(int) Poll ID"));
    }

    #[test]
    fn test_duplicate_command_rejected() {
        let mut menu = create_query_menu("gov", "Gov queries");
        menu.command("state").action(noop).unwrap();
        assert_eq!(
            menu.command("state").action(noop),
            Err(MenuError::DuplicateCommand {
                menu: "gov",
                command: "state"
            })
        );
    }

    #[test]
    fn test_declaration_errors() {
        let mut menu = create_query_menu("gov", "Gov queries");
        assert!(matches!(
            menu.command("poll <poll-id>").describe_arg("pollId", "x").action(noop),
            Err(MenuError::UnknownArgument { .. })
        ));
        assert!(matches!(
            menu.command("polls").option("--limit <int>", "").option("--limit <int>", "").action(noop),
            Err(MenuError::DuplicateArgument { .. })
        ));
        assert!(matches!(
            menu.command("polls").option("--output <fmt>", "").action(noop),
            Err(MenuError::ReservedArgument { .. })
        ));
        assert!(matches!(
            menu.command("polls").option("--a <x>", "").paired_options("a", "b").action(noop),
            Err(MenuError::UnknownArgument { .. })
        ));
        assert!(menu.commands().is_empty());
    }

    #[test]
    fn test_paired_options_checked_before_handler() {
        let mut menu = create_query_menu("gov", "Gov queries");
        menu.command("x")
            .option("--execute-to <AccAddress>", "")
            .option("--execute-msg <json>", "")
            .paired_options("execute-to", "execute-msg")
            .action(|_, _| panic!("handler must not run"))
            .unwrap();

        let spec = menu.find("x").unwrap();
        let err = spec
            .invoke(&Args::from_pairs(&[("execute-to", GOV)]), &Mirror::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "both --execute-to and --execute-msg must be supplied if either is"
        );
    }

    #[test]
    fn test_args_from_clap_matches() {
        let mut menu = create_query_menu("gov", "Gov queries");
        menu.command("voters <poll-id>")
            .option("--start-after <string>", "")
            .option("--limit <int>", "")
            .action(|args, _| {
                let _ = parse::int::<u64>(args.required("poll-id")?)?;
                noop(args, &Mirror::default())
            })
            .unwrap();

        let matches = menu
            .to_clap("gov")
            .try_get_matches_from(["gov", "voters", "5", "--limit", "10"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        let spec = menu.find(name).unwrap();
        let args = Args::from_matches(spec, sub);

        assert_eq!(args.get("poll-id"), Some("5"));
        assert_eq!(args.get("limit"), Some("10"));
        assert_eq!(args.get("start-after"), None);
    }

    #[test]
    fn test_required_option_enforced_by_clap() {
        let mut menu = create_exec_menu("gov", "Gov functions");
        menu.command("create-poll")
            .required_option("--title <string>", "*Title of poll")
            .action(|_, _| Err(CliError::MissingArgument("unreachable")))
            .unwrap();

        let result = menu.to_clap("gov").try_get_matches_from(["gov", "create-poll"]);
        assert!(result.is_err());
    }
}
