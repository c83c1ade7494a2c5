use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug)]
pub struct OutputPreferences {
    pub color_enabled: bool,
    pub quiet_mode: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            color_enabled: true,
            quiet_mode: false,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn should_skip(kind: MessageKind, prefs: &OutputPreferences) -> bool {
    prefs.quiet_mode && matches!(kind, MessageKind::Hint)
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO", "[i]"),
        MessageKind::Success => ("SUCCESS", "[✓]"),
        MessageKind::Warning => ("WARNING", "[!]"),
        MessageKind::Error => ("ERROR", "[x]"),
        MessageKind::Hint => ("HINT", ">"),
        MessageKind::Section => ("INFO", ""),
    }
}

pub(crate) fn apply_style(
    kind: MessageKind,
    message: impl fmt::Display,
    prefs: &OutputPreferences,
) -> String {
    let text = message.to_string();

    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => {
            let (label, icon) = build_label(kind);
            format!("{label}: {icon} {text}")
        }
    };

    if !prefs.color_enabled {
        return formatted;
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Hint => formatted.bright_cyan().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = current_preferences();
    if should_skip(kind, &prefs) {
        return;
    }
    let formatted = apply_style(kind, message, &prefs);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_keeps_labels_without_escape_codes() {
        let prefs = OutputPreferences {
            color_enabled: false,
            quiet_mode: false,
        };
        assert_eq!(
            apply_style(MessageKind::Warning, "Budget Warning", &prefs),
            "WARNING: [!] Budget Warning"
        );
        assert_eq!(apply_style(MessageKind::Section, " Balance ", &prefs), "=== Balance ===");
    }

    #[test]
    fn quiet_mode_skips_hints_only() {
        let prefs = OutputPreferences {
            color_enabled: false,
            quiet_mode: true,
        };
        assert!(should_skip(MessageKind::Hint, &prefs));
        assert!(!should_skip(MessageKind::Error, &prefs));
    }
}
