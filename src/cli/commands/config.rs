use std::path::PathBuf;

use wallet_core::RecordStore;
use wallet_storage_json::JsonWalletStorage;

use super::{require_args, split_subcommand, unknown_subcommand};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn, TableRenderer};
use crate::config::{ConfigError, CONFIG_KEYS};

pub(crate) const SUBCOMMANDS: &[&str] = &["show", "set"];

const USAGE: &str = "config <show|set> ...";
const SET_USAGE: &str = "config set <key> <value>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences",
        USAGE,
        cmd_config,
    )
    .with_subcommands(SUBCOMMANDS)]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return show(context);
    }
    let (subcommand, rest) = split_subcommand(args, USAGE)?;
    match subcommand.as_str() {
        "show" => show(context),
        "set" => set(context, rest),
        other => unknown_subcommand("config", other),
    }
}

fn show(context: &mut ShellContext) -> CommandResult {
    let mut table = Table::new(
        Some("Configuration"),
        vec![TableColumn::new("Key", 22), TableColumn::new("Value", 24)],
    );
    {
        let config = context.config_read();
        for key in CONFIG_KEYS {
            let value = if key == "data_dir" {
                context.data_dir.display().to_string()
            } else {
                config.get(key).map_err(config_error)?
            };
            table.add_row(vec![key.to_string(), value]);
        }
    }
    TableRenderer::render(&table);
    io::print_hint(format!(
        "Stored at {}",
        context.config_manager.config_path().display()
    ));
    Ok(())
}

fn set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, SET_USAGE)?;
    let key = args[0].to_ascii_lowercase();
    let value = args[1..].join(" ");

    context
        .config_write()
        .set(&key, &value)
        .map_err(config_error)?;
    context.persist_config()?;

    let shown = if key == "data_dir" {
        let data_dir = context
            .config_read()
            .data_dir
            .clone()
            .unwrap_or_else(|| context.config_manager.base_dir());
        switch_data_dir(context, data_dir)?;
        context.data_dir.display().to_string()
    } else {
        context.config_read().get(&key).map_err(config_error)?
    };
    io::print_success(format!("{key} = {shown}"));
    Ok(())
}

fn switch_data_dir(context: &mut ShellContext, data_dir: PathBuf) -> CommandResult {
    let storage = JsonWalletStorage::new(data_dir.clone())?;
    context.store = RecordStore::new(storage, context.clock.clone());
    context.data_dir = data_dir;
    io::print_info(format!("Wallet data now read from {}", context.data_dir.display()));
    Ok(())
}

fn config_error(err: ConfigError) -> CommandError {
    match err {
        ConfigError::InvalidValue { .. } | ConfigError::UnknownKey(_) => {
            CommandError::InvalidArguments(err.to_string())
        }
        other => CommandError::from_core(other.into()),
    }
}
