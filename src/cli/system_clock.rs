use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;
use wallet_core::{Clock, FixedClock};

/// Environment variable pinning "today" to an ISO date.
pub const TODAY_ENV: &str = "WALLET_TODAY";

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The system clock, or a clock fixed to `WALLET_TODAY` when it holds a
/// valid `YYYY-MM-DD` date.
pub fn clock_from_env() -> Arc<dyn Clock> {
    match std::env::var(TODAY_ENV) {
        Ok(raw) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Arc::new(FixedClock::at_date(date)),
            Err(_) => {
                warn!("ignoring {} value `{}`", TODAY_ENV, raw);
                Arc::new(SystemClock)
            }
        },
        Err(_) => Arc::new(SystemClock),
    }
}
