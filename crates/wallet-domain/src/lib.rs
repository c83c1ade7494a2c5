//! wallet-domain
//!
//! Pure domain models (Transaction, Category, Budget, report shapes).
//! No I/O, no CLI, no storage. Only data types, validation and calendar helpers.

pub mod budget;
pub mod category;
pub mod common;
pub mod report;
pub mod transaction;

pub use budget::*;
pub use category::*;
pub use common::*;
pub use report::*;
pub use transaction::*;
