//! Shared runtime state for CLI interactions and command execution.

use std::{
    path::PathBuf,
    sync::{Arc, RwLock},
};

use dialoguer::theme::ColorfulTheme;
use wallet_core::{Clock, RecordStore};
use wallet_storage_json::JsonWalletStorage;

use crate::config::{Config, ConfigManager};

use super::{formatters::CliFormatters, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: RecordStore<JsonWalletStorage>,
    pub theme: ColorfulTheme,
    pub clock: Arc<dyn Clock>,
    pub formatters: CliFormatters,
    pub config_manager: ConfigManager,
    pub config: Arc<RwLock<Config>>,
    pub data_dir: PathBuf,
    pub last_command: Option<String>,
    pub running: bool,
}
