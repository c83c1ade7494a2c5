use std::sync::{
    atomic::{AtomicBool, Ordering},
    RwLock,
};

use wallet_domain::{Budget, Transaction};

use crate::CoreError;

/// Abstraction over persistence backends holding the wallet's three keys:
/// transactions, budgets and the cached balance scalar.
pub trait WalletRepository: Send + Sync {
    fn load_transactions(&self) -> Result<Vec<Transaction>, CoreError>;
    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), CoreError>;
    fn load_budgets(&self) -> Result<Vec<Budget>, CoreError>;
    fn save_budgets(&self, budgets: &[Budget]) -> Result<(), CoreError>;
    fn load_balance(&self) -> Result<f64, CoreError>;
    fn save_balance(&self, balance: f64) -> Result<(), CoreError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    balance: f64,
}

/// In-memory repository used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<MemoryState>,
    fail_writes: AtomicBool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with existing records.
    pub fn with_records(transactions: Vec<Transaction>, budgets: Vec<Budget>) -> Self {
        let balance = transactions.iter().map(Transaction::signed_amount).sum();
        Self {
            state: RwLock::new(MemoryState {
                transactions,
                budgets,
                balance,
            }),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent save fail with a storage error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Overwrites the cached balance without touching the transactions.
    pub fn set_balance(&self, balance: f64) -> Result<(), CoreError> {
        self.write()?.balance = balance;
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, MemoryState>, CoreError> {
        self.state
            .read()
            .map_err(|_| CoreError::Storage("memory repository lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, MemoryState>, CoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::Storage("memory repository is read-only".into()));
        }
        self.state
            .write()
            .map_err(|_| CoreError::Storage("memory repository lock poisoned".into()))
    }
}

impl WalletRepository for MemoryRepository {
    fn load_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        Ok(self.read()?.transactions.clone())
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        self.write()?.transactions = transactions.to_vec();
        Ok(())
    }

    fn load_budgets(&self) -> Result<Vec<Budget>, CoreError> {
        Ok(self.read()?.budgets.clone())
    }

    fn save_budgets(&self, budgets: &[Budget]) -> Result<(), CoreError> {
        self.write()?.budgets = budgets.to_vec();
        Ok(())
    }

    fn load_balance(&self) -> Result<f64, CoreError> {
        Ok(self.read()?.balance)
    }

    fn save_balance(&self, balance: f64) -> Result<(), CoreError> {
        self.write()?.balance = balance;
        Ok(())
    }
}

impl<R: WalletRepository + ?Sized> WalletRepository for Box<R> {
    fn load_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        (**self).load_transactions()
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        (**self).save_transactions(transactions)
    }

    fn load_budgets(&self) -> Result<Vec<Budget>, CoreError> {
        (**self).load_budgets()
    }

    fn save_budgets(&self, budgets: &[Budget]) -> Result<(), CoreError> {
        (**self).save_budgets(budgets)
    }

    fn load_balance(&self) -> Result<f64, CoreError> {
        (**self).load_balance()
    }

    fn save_balance(&self, balance: f64) -> Result<(), CoreError> {
        (**self).save_balance(balance)
    }
}
