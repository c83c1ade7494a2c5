#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;
use wallet::{
    config::ConfigManager,
    wallet_core::{FixedClock, RecordStore},
    wallet_storage_json::JsonWalletStorage,
};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Date every test clock is pinned to.
pub const TODAY: &str = "2024-06-18";

pub fn today() -> NaiveDate {
    NaiveDate::parse_from_str(TODAY, "%Y-%m-%d").expect("valid fixture date")
}

/// Fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates an isolated store and config manager backed by a unique directory.
pub fn setup_test_env() -> (RecordStore<JsonWalletStorage>, ConfigManager, PathBuf) {
    let base = temp_base();
    let storage = JsonWalletStorage::new(base.clone()).expect("create json storage backend");
    let store = RecordStore::new(storage, Arc::new(FixedClock::at_date(today())));
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (store, config_manager, base)
}
