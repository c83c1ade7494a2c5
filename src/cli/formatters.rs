use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use wallet_core::{CurrencyFormatter, CurrencySettings, DateFormatter, LongDateFormatter};

use crate::config::Config;

/// Formatter implementations backed by the active CLI configuration.
#[derive(Clone)]
pub struct CliFormatters {
    config: Arc<RwLock<Config>>,
}

impl CliFormatters {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self { config }
    }

    fn currency_settings(&self) -> CurrencySettings {
        let config = self
            .config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        CurrencySettings::new(config.currency.as_str(), config.currency_precision)
    }

    /// Long form date, e.g. `March 5, 2024`.
    pub fn format_long_date(&self, date: NaiveDate) -> String {
        LongDateFormatter.format_date(date)
    }
}

impl CurrencyFormatter for CliFormatters {
    fn format_amount(&self, amount: f64) -> String {
        self.currency_settings().format_amount(amount)
    }
}

impl DateFormatter for CliFormatters {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_follow_configured_currency() {
        let config = Arc::new(RwLock::new(Config::default()));
        let formatters = CliFormatters::new(config.clone());
        assert_eq!(formatters.format_amount(1250.0), "RWF 1,250");

        {
            let mut guard = config.write().unwrap();
            guard.currency = "USD".into();
            guard.currency_precision = 2;
        }
        assert_eq!(formatters.format_amount(-3.5), "-USD 3.50");
    }
}
