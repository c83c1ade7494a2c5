use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn, TableRenderer};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    let data_dir = context.data_dir.display().to_string();
    let build = format!("{} ({})", meta.git_hash, meta.git_status);
    let mut table = Table::new(
        Some(format!("Wallet {}", meta.version)),
        vec![TableColumn::new("Field", 12), TableColumn::new("Value", 24)],
    );
    for (field, value) in [
        ("CLI version", build_info::CLI_VERSION),
        ("Build", build.as_str()),
        ("Built at", meta.timestamp),
        ("Target", meta.target),
        ("Profile", meta.profile),
        ("Rustc", meta.rustc),
        ("Data dir", data_dir.as_str()),
    ] {
        table.add_row(vec![field, value]);
    }
    TableRenderer::render(&table);
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
