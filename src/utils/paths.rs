use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".wallet";

/// Environment variable overriding the application data directory.
pub const HOME_ENV: &str = "WALLET_HOME";

/// Returns the application-specific data directory, defaulting to `~/.wallet`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
