use std::{
    collections::HashMap,
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::io::{print_info, print_warning};

/// Environment variable switching the shell to non-interactive script mode.
pub const SCRIPT_ENV: &str = "WALLET_CLI_SCRIPT";

/// Runs the shell until `exit`, end of input, or a confirmed interrupt.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.completion_table())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    print_info("Type `help` to list commands.");

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                print_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match handle_line(context, trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            print_warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };

    if tokens.is_empty() {
        return Ok(LoopControl::Continue);
    }

    let raw = &tokens[0];
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    context.last_command = Some(line.to_string());

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

/// Completes command names in the first position and subcommands in the second.
struct CommandHelper {
    commands: Vec<String>,
    subcommands: HashMap<String, &'static [&'static str]>,
}

impl CommandHelper {
    fn new(table: Vec<(&'static str, &'static [&'static str])>) -> Self {
        let mut commands: Vec<String> = table
            .iter()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        let subcommands = table
            .into_iter()
            .filter(|(_, subs)| !subs.is_empty())
            .map(|(name, subs)| (name.to_ascii_lowercase(), subs))
            .collect();
        Self {
            commands,
            subcommands,
        }
    }

    fn candidates(&self, words: &[&str], needle: &str) -> Vec<Pair> {
        let pool: Vec<&str> = match words {
            [] => self.commands.iter().map(String::as_str).collect(),
            [command] => self
                .subcommands
                .get(&command.to_ascii_lowercase())
                .map(|subs| subs.to_vec())
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        pool.into_iter()
            .filter(|name| name.starts_with(needle))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();
        let needle = prefix[start..].to_ascii_lowercase();
        Ok((start, self.candidates(&words, &needle)))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> CommandHelper {
        CommandHelper::new(vec![
            ("transaction", &["add", "list", "recent"] as &[&str]),
            ("budget", &["set", "remove", "list"] as &[&str]),
            ("balance", &[] as &[&str]),
            ("exit", &[] as &[&str]),
        ])
    }

    fn replacements(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|pair| pair.replacement).collect()
    }

    #[test]
    fn completes_command_names_by_prefix() {
        assert_eq!(replacements(helper().candidates(&[], "b")), vec!["balance", "budget"]);
    }

    #[test]
    fn completes_subcommands_after_command() {
        assert_eq!(
            replacements(helper().candidates(&["budget"], "s")),
            vec!["set"]
        );
        assert!(helper().candidates(&["balance"], "").is_empty());
        assert!(helper().candidates(&["budget", "set"], "").is_empty());
    }

    #[test]
    fn unbalanced_quotes_are_parse_errors() {
        assert!(parse_command_line("transaction add \"open").is_err());
    }
}
