use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Keys accepted by [`Config::set`], in display order.
pub const CONFIG_KEYS: [&str; 7] = [
    "locale",
    "currency",
    "currency_precision",
    "default_budget_period",
    "recent_limit",
    "ui_color_enabled",
    "data_dir",
];

const BUDGET_PERIODS: [&str; 3] = ["weekly", "monthly", "yearly"];
const MAX_PRECISION: u8 = 6;
/// Display value of an unset `data_dir`, also accepted by `set` to clear it.
const DEFAULT_DATA_DIR: &str = "default";

/// Stores user-configurable wallet preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub currency_precision: u8,
    #[serde(default = "Config::default_budget_period_value")]
    pub default_budget_period: String,
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for wallet data. Unset means the wallet base directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "RWF".into(),
            currency_precision: 0,
            default_budget_period: Self::default_budget_period_value(),
            recent_limit: Self::default_recent_limit(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_budget_period_value() -> String {
        "monthly".into()
    }

    pub fn default_recent_limit() -> usize {
        5
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Current value of `key` rendered for display.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "currency_precision" => self.currency_precision.to_string(),
            "default_budget_period" => self.default_budget_period.clone(),
            "recent_limit" => self.recent_limit.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "data_dir" => self
                .data_dir
                .as_ref()
                .map_or_else(|| DEFAULT_DATA_DIR.to_string(), |path| path.display().to_string()),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Parses and assigns `value` to `key`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.to_string(),
        };
        match key {
            "locale" => {
                if value.is_empty() {
                    return Err(invalid("locale cannot be empty"));
                }
                self.locale = value.to_string();
            }
            "currency" => {
                if value.len() != 3 || !value.chars().all(|ch| ch.is_ascii_alphabetic()) {
                    return Err(invalid("expected a three-letter currency code"));
                }
                self.currency = value.to_ascii_uppercase();
            }
            "currency_precision" => {
                let precision: u8 = value
                    .parse()
                    .map_err(|_| invalid("expected a whole number"))?;
                if precision > MAX_PRECISION {
                    return Err(invalid("precision must be between 0 and 6"));
                }
                self.currency_precision = precision;
            }
            "default_budget_period" => {
                let period = value.to_ascii_lowercase();
                if !BUDGET_PERIODS.contains(&period.as_str()) {
                    return Err(invalid("expected weekly, monthly, or yearly"));
                }
                self.default_budget_period = period;
            }
            "recent_limit" => {
                let limit: usize = value
                    .parse()
                    .map_err(|_| invalid("expected a whole number"))?;
                if limit == 0 {
                    return Err(invalid("limit must be at least 1"));
                }
                self.recent_limit = limit;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => return Err(invalid("expected on or off")),
                };
            }
            "data_dir" => {
                self.data_dir = if value.is_empty() || value.eq_ignore_ascii_case(DEFAULT_DATA_DIR) {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}
