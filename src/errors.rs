use std::result::Result as StdResult;

use thiserror::Error;
use wallet_config::ConfigError as WalletConfigError;
use wallet_core::CoreError;

/// Unified error type for the core, storage and configuration layers.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, WalletError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] WalletError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        WalletError::StorageError(err.to_string())
    }
}

impl From<CoreError> for WalletError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) => WalletError::InvalidInput(message),
            CoreError::Storage(message) | CoreError::Serde(message) => {
                WalletError::StorageError(message)
            }
            CoreError::Io(err) => WalletError::StorageError(err.to_string()),
        }
    }
}

impl From<WalletConfigError> for WalletError {
    fn from(err: WalletConfigError) -> Self {
        match err {
            WalletConfigError::Io(io) => WalletError::StorageError(io.to_string()),
            WalletConfigError::Serde(message) => WalletError::ConfigError(message),
            other @ (WalletConfigError::InvalidValue { .. } | WalletConfigError::UnknownKey(_)) => {
                WalletError::InvalidInput(other.to_string())
            }
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(WalletError::from(err))
    }
}

impl From<WalletConfigError> for CliError {
    fn from(err: WalletConfigError) -> Self {
        CliError::from(WalletError::from(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_wallet_variants() {
        let err = WalletError::from(CoreError::Validation("amount must be positive".into()));
        assert!(matches!(err, WalletError::InvalidInput(_)));
        let err = WalletError::from(CoreError::Serde("bad json".into()));
        assert!(matches!(err, WalletError::StorageError(_)));
    }

    #[test]
    fn config_errors_keep_their_message() {
        let err = WalletError::from(WalletConfigError::UnknownKey("theme".into()));
        assert_eq!(err.to_string(), "Invalid input: Unknown configuration key `theme`");
        let err = WalletError::from(WalletConfigError::Serde("eof".into()));
        assert_eq!(err.to_string(), "Configuration error: eof");
    }
}
