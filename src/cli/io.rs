use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::core::CommandError;
use crate::cli::output::{self, OutputPreferences};
use crate::config::Config;

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

/// Print a warning message via the standard CLI output helpers.
pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

/// Print an error message via the standard CLI output helpers.
pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

/// Print a success message via the standard CLI output helpers.
pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Applies display preferences from the configuration. `NO_COLOR` always
/// disables color.
pub fn apply_config(config: &Config) {
    let color_enabled = config.ui_color_enabled && std::env::var_os("NO_COLOR").is_none();
    colored::control::set_override(color_enabled);
    output::set_preferences(OutputPreferences {
        color_enabled,
        quiet_mode: false,
    });
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}
