use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::table::{Table, TableColumn, TableRenderer};

pub fn print_overview(registry: &CommandRegistry) {
    let mut table = Table::new(
        Some("Available commands"),
        vec![TableColumn::new("Command", 14), TableColumn::new("Description", 30)],
    );
    for entry in registry.list() {
        table.add_row(vec![entry.name, entry.description]);
    }
    TableRenderer::render(&table);
    output::hint("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    println!("  description: {}", entry.description);
    println!("  usage:       {}", entry.usage);
    if !entry.subcommands.is_empty() {
        println!("  subcommands: {}", entry.subcommands.join(", "));
    }
}
