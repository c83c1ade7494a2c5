//! Dispatch, error reporting, and shell context helpers.

use std::{
    io,
    path::PathBuf,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use uuid::Uuid;
use wallet_core::{Clock, CoreError, RecordStore};
use wallet_storage_json::JsonWalletStorage;

use crate::{
    config::{self, Config, ConfigManager},
    errors::WalletError,
    utils::paths::app_data_dir,
};

pub use crate::cli::shell_context::{CliMode, ShellContext};
pub use crate::errors::CliError;

use super::commands;
use super::formatters::CliFormatters;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
use super::system_clock::clock_from_env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    /// Builds a context rooted at `WALLET_HOME` (or `~/.wallet`) using the
    /// system clock, or the date pinned by `WALLET_TODAY`.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, app_data_dir(), clock_from_env())
    }

    /// Builds a context whose configuration lives under `base`. Wallet
    /// documents go to the configured `data_dir`, defaulting to `base`.
    pub fn with_base_dir(
        mode: CliMode,
        base: PathBuf,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = config::manager_with_base(base.clone())?;
        let config = config_manager.load()?;
        cli_io::apply_config(&config);
        let data_dir = config::data_dir_for(&config, base);
        let storage = JsonWalletStorage::new(data_dir.clone())?;
        let config = Arc::new(RwLock::new(config));

        Ok(ShellContext {
            mode,
            registry,
            store: RecordStore::new(storage, clock.clone()),
            theme: ColorfulTheme::default(),
            clock,
            formatters: CliFormatters::new(config.clone()),
            config_manager,
            config,
            data_dir,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        "wallet> ".into()
    }

    pub(crate) fn completion_table(&self) -> Vec<(&'static str, &'static [&'static str])> {
        self.registry.completion_table()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn config_read(&self) -> RwLockReadGuard<'_, Config> {
        self.config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn config_write(&self) -> RwLockWriteGuard<'_, Config> {
        self.config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        let config = self.config_read();
        self.config_manager
            .save(&config)
            .map_err(|err| CommandError::from_core(err.into()))?;
        cli_io::apply_config(&config);
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.closest_command(input) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn closest_command(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= 3)
            .map(|(_, key)| key)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

pub(crate) fn parse_amount(input: &str) -> Result<f64, CommandError> {
    let cleaned = input.replace(',', "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("invalid amount `{}`", input)))
}

pub(crate) fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] WalletError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl CommandError {
    pub(crate) fn from_core(error: WalletError) -> Self {
        CommandError::Core(error)
    }
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) => CommandError::InvalidArguments(message),
            other => CommandError::Core(other.into()),
        }
    }
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    base: PathBuf,
    today: NaiveDate,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let clock = Arc::new(wallet_core::FixedClock::at_date(today));
    let mut app = ShellContext::with_base_dir(CliMode::Script, base, clock)?;
    for line in lines {
        match app.process_line(line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wallet_core::CurrencyFormatter;
    use wallet_domain::{BudgetPeriod, BudgetStatus, ExpenseCategory, TransactionKind};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 18).unwrap()
    }

    #[test]
    fn parse_line_handles_quotes() {
        let tokens =
            crate::cli::shell::parse_command_line("transaction add expense 12 food \"Team lunch\"")
                .unwrap();
        assert_eq!(
            tokens,
            vec!["transaction", "add", "expense", "12", "food", "Team lunch"]
        );
    }

    #[test]
    fn script_runner_records_transactions_and_budgets() {
        let dir = tempdir().unwrap();
        let context = process_script(
            dir.path().to_path_buf(),
            today(),
            &[
                "transaction add income 2000 salary \"June salary\"",
                "budget set food 500 weekly",
                "transaction add expense 450 food Groceries --method card",
                "exit",
                "transaction add expense 1 food ignored",
            ],
        )
        .unwrap();

        let transactions = context.store.list_transactions().unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].kind, TransactionKind::Expense);
        assert_eq!(transactions[0].description, "Groceries");
        assert_eq!(context.store.balance().unwrap(), 1550.0);

        let tracking = context.store.budget_tracking().unwrap();
        assert_eq!(tracking[0].budget.category, ExpenseCategory::Food);
        assert_eq!(tracking[0].budget.period, BudgetPeriod::Weekly);
        assert_eq!(tracking[0].status, BudgetStatus::Warning);
    }

    #[test]
    fn invalid_input_is_reported_not_fatal() {
        let dir = tempdir().unwrap();
        let mut context = ShellContext::with_base_dir(
            CliMode::Script,
            dir.path().to_path_buf(),
            Arc::new(wallet_core::FixedClock::at_date(today())),
        )
        .unwrap();
        let err = context
            .process_line("transaction add expense 0 food nothing")
            .expect_err("zero amount");
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        let err = context
            .process_line("transaction add income 10 food refund")
            .expect_err("kind mismatch");
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        assert!(context.store.list_transactions().unwrap().is_empty());
    }

    #[test]
    fn closest_command_uses_edit_distance() {
        let dir = tempdir().unwrap();
        let context = process_script(dir.path().to_path_buf(), today(), &[]).unwrap();
        assert_eq!(context.closest_command("balanse"), Some("balance"));
        assert_eq!(context.closest_command("BUDGT"), Some("budget"));
        assert_eq!(context.closest_command("xyzzyplugh"), None);
    }

    #[test]
    fn config_set_persists_and_changes_formatting() {
        let dir = tempdir().unwrap();
        let base = dir.path().to_path_buf();
        process_script(
            base.clone(),
            today(),
            &["config set currency usd", "config set currency_precision 2"],
        )
        .unwrap();

        let context = process_script(base, today(), &[]).unwrap();
        assert_eq!(context.formatters.format_amount(1234.5), "USD 1,234.50");
    }

    #[test]
    fn configured_data_dir_redirects_storage() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("home");
        let data = dir.path().join("elsewhere");
        let command = format!("config set data_dir {}", data.display());
        process_script(base.clone(), today(), &[command.as_str()]).unwrap();

        let context = process_script(
            base,
            today(),
            &["transaction add income 10 gifts \"Birthday gift\""],
        )
        .unwrap();
        assert_eq!(context.data_dir, data);
        assert!(data.join("wallet_transactions.json").exists());
    }

    #[test]
    fn resetting_data_dir_returns_to_the_base_dir() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("home");
        let data = dir.path().join("elsewhere");
        let command = format!("config set data_dir {}", data.display());
        let context = process_script(
            base.clone(),
            today(),
            &[command.as_str(), "config set data_dir default"],
        )
        .unwrap();

        assert_eq!(context.data_dir, base);
        assert!(context.config_read().data_dir.is_none());
        assert_eq!(context.config_read().get("data_dir").unwrap(), "default");
    }
}
