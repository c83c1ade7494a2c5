use thiserror::Error;
use wallet_domain::{CategoryParseError, DateWindowError, InputError};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<InputError> for CoreError {
    fn from(err: InputError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl From<CategoryParseError> for CoreError {
    fn from(err: CategoryParseError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl From<DateWindowError> for CoreError {
    fn from(err: DateWindowError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
