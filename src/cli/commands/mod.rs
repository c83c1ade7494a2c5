pub mod balance;
pub mod budget;
pub mod config;
pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) const ROOT_COMMAND_ORDER: &[&str] = &[
    "transaction",
    "budget",
    "balance",
    "report",
    "notifications",
    "config",
    "help",
    "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut entries = Vec::new();
    entries.extend(transaction::definitions());
    entries.extend(budget::definitions());
    entries.extend(balance::definitions());
    entries.extend(report::definitions());
    entries.extend(config::definitions());
    entries.extend(system::definitions());
    entries
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    for name in ROOT_COMMAND_ORDER {
        if let Some(index) = entries.iter().position(|entry| entry.name == *name) {
            registry.register(entries.remove(index));
        }
    }
    for entry in entries {
        registry.register(entry);
    }
}

/// Splits `args` into the subcommand keyword and its arguments.
pub(crate) fn split_subcommand<'a>(
    args: &'a [&'a str],
    usage: &str,
) -> Result<(String, &'a [&'a str]), CommandError> {
    match args.split_first() {
        Some((head, rest)) => Ok((head.to_lowercase(), rest)),
        None => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
}

pub(crate) fn unknown_subcommand(command: &str, other: &str) -> CommandResult {
    Err(CommandError::InvalidArguments(format!(
        "unknown {command} subcommand `{other}`"
    )))
}

/// Positional arguments plus `--flag value` options.
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    options: Vec<(&'a str, &'a str)>,
}

impl<'a> ParsedArgs<'a> {
    pub fn parse(args: &[&'a str], flags: &[&str]) -> Result<Self, CommandError> {
        let mut positional = Vec::new();
        let mut options = Vec::new();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            match arg.strip_prefix("--") {
                Some(flag) if flags.contains(&flag) => {
                    let value = iter.next().ok_or_else(|| {
                        CommandError::InvalidArguments(format!("missing value for --{flag}"))
                    })?;
                    options.push((flag, value));
                }
                Some(flag) => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown option `--{flag}`"
                    )))
                }
                None => positional.push(arg),
            }
        }
        Ok(Self {
            positional,
            options,
        })
    }

    pub fn option(&self, flag: &str) -> Option<&'a str> {
        self.options
            .iter()
            .rev()
            .find(|(name, _)| *name == flag)
            .map(|(_, value)| *value)
    }
}

pub(crate) fn parse_count(input: &str, what: &str) -> Result<usize, CommandError> {
    input
        .parse::<usize>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("{what} must be a positive number"))
        })
}

pub(crate) fn require_args(args: &[&str], count: usize, usage: &str) -> CommandResult {
    if args.len() < count {
        return Err(CommandError::InvalidArguments(format!("usage: {usage}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_follows_root_order() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ROOT_COMMAND_ORDER);
    }

    #[test]
    fn parsed_args_separate_flags_from_positionals() {
        let args = ["expense", "12", "--method", "card", "Team", "lunch"];
        let parsed = ParsedArgs::parse(&args, &["method", "date"]).unwrap();
        assert_eq!(parsed.positional, vec!["expense", "12", "Team", "lunch"]);
        assert_eq!(parsed.option("method"), Some("card"));
        assert_eq!(parsed.option("date"), None);
    }

    #[test]
    fn parsed_args_reject_unknown_or_dangling_flags() {
        assert!(ParsedArgs::parse(&["--color", "red"], &["method"]).is_err());
        assert!(ParsedArgs::parse(&["12", "--method"], &["method"]).is_err());
    }

    #[test]
    fn counts_must_be_positive() {
        assert_eq!(parse_count("3", "limit").unwrap(), 3);
        assert!(parse_count("0", "limit").is_err());
        assert!(parse_count("x", "limit").is_err());
    }
}
