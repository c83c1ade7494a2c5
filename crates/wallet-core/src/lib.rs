//! wallet-core
//!
//! Business logic and services for the wallet.
//! Depends on wallet-domain. No CLI, no terminal I/O; persistence only through
//! the [`storage::WalletRepository`] seam.

pub mod aggregation_service;
pub mod balance_service;
pub mod budget_service;
pub mod error;
pub mod format;
pub mod notification_service;
pub mod record_store;
pub mod storage;
pub mod time;

pub use aggregation_service::*;
pub use balance_service::*;
pub use budget_service::*;
pub use error::CoreError;
pub use format::{CurrencyFormatter, CurrencySettings, DateFormatter, LongDateFormatter};
pub use notification_service::*;
pub use record_store::*;
pub use storage::{MemoryRepository, WalletRepository};
pub use time::{Clock, FixedClock};
