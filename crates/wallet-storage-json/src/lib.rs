use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;
use wallet_core::{storage::WalletRepository, CoreError};
use wallet_domain::{Budget, Transaction};

pub const TRANSACTIONS_KEY: &str = "wallet_transactions";
pub const BUDGETS_KEY: &str = "wallet_budgets";
pub const BALANCE_KEY: &str = "wallet_balance";

const FILE_EXTENSION: &str = "json";
const CORRUPT_SUFFIX: &str = "corrupt";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed key-value persistence: one JSON document per key.
#[derive(Debug, Clone)]
pub struct JsonWalletStorage {
    root: PathBuf,
}

impl JsonWalletStorage {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", key, FILE_EXTENSION))
    }

    /// Reads the document stored under `key`. A missing file yields the
    /// default value. Unreadable JSON is moved aside to `<file>.corrupt`,
    /// logged, and also yields the default.
    pub fn load_key<T>(&self, key: &str) -> Result<T, CoreError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.key_path(key);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&data) {
            Ok(value) => Ok(value),
            Err(err) => {
                let quarantine = corrupt_path(&path);
                match fs::rename(&path, &quarantine) {
                    Ok(()) => warn!(
                        "unreadable `{}` moved to {}: {}",
                        key,
                        quarantine.display(),
                        err
                    ),
                    Err(rename_err) => warn!(
                        "unreadable `{}` at {} could not be moved aside ({}): {}",
                        key,
                        path.display(),
                        rename_err,
                        err
                    ),
                }
                Ok(T::default())
            }
        }
    }

    /// Replaces the document stored under `key` via a temporary file rename.
    pub fn save_key<T>(&self, key: &str, value: &T) -> Result<(), CoreError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.key_path(key);
        let data =
            serde_json::to_string_pretty(value).map_err(|err| CoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl WalletRepository for JsonWalletStorage {
    fn load_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        self.load_key(TRANSACTIONS_KEY)
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        self.save_key(TRANSACTIONS_KEY, transactions)
    }

    fn load_budgets(&self) -> Result<Vec<Budget>, CoreError> {
        self.load_key(BUDGETS_KEY)
    }

    fn save_budgets(&self, budgets: &[Budget]) -> Result<(), CoreError> {
        self.save_key(BUDGETS_KEY, budgets)
    }

    fn load_balance(&self) -> Result<f64, CoreError> {
        self.load_key(BALANCE_KEY)
    }

    fn save_balance(&self, balance: f64) -> Result<(), CoreError> {
        self.save_key(BALANCE_KEY, &balance)
    }
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(CORRUPT_SUFFIX);
    PathBuf::from(name)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
