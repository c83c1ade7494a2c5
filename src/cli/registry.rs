//! Command table consulted by dispatch, help and completion.

use std::collections::HashMap;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub subcommands: &'static [&'static str],
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            subcommands: &[],
            handler,
        }
    }

    /// Second-level keywords offered by completion and help.
    pub fn with_subcommands(mut self, subcommands: &'static [&'static str]) -> Self {
        self.subcommands = subcommands;
        self
    }
}

/// Commands in registration order, indexed by name.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    index: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`, replacing any earlier command with the same name.
    pub fn register(&mut self, entry: CommandEntry) {
        match self.index.get(entry.name) {
            Some(&slot) => self.entries[slot] = entry,
            None => {
                self.index.insert(entry.name, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    /// Command names paired with their subcommands, for completion.
    pub fn completion_table(&self) -> Vec<(&'static str, &'static [&'static str])> {
        self.entries
            .iter()
            .map(|entry| (entry.name, entry.subcommands))
            .collect()
    }
}
