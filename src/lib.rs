#![doc(test(attr(deny(warnings))))]

//! Wallet records income and expense transactions, tracks per-category
//! budgets, and derives balances, chart series and alerts from them.
//!
//! The domain, services, storage and configuration live in the workspace
//! crates re-exported below; this crate adds tracing, error unification and
//! the `wallet_cli` command shell.

pub mod cli;
pub mod config;
pub mod errors;
pub mod utils;

pub use wallet_config;
pub use wallet_core;
pub use wallet_domain;
pub use wallet_storage_json;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Wallet tracing initialized.");
    });
}
