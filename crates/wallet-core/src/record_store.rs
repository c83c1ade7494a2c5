use std::{cmp::Reverse, sync::Arc};

use chrono::NaiveDate;
use tracing::{debug, warn};
use wallet_domain::{
    Budget, BudgetAlert, BudgetInput, BudgetTracking, ExpenseCategory, Transaction,
    TransactionInput, TransactionKind, TransactionPage,
};

use crate::{
    balance_service::BalanceService, budget_service::BudgetService, storage::WalletRepository,
    time::Clock, CoreError,
};

const BALANCE_DRIFT_TOLERANCE: f64 = 1e-6;

/// Point-in-time copy of every stored record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletSnapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
}

/// Outcome of recording a transaction together with the budget alert it raised.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTransaction {
    pub transaction: Transaction,
    pub alert: Option<BudgetAlert>,
}

/// Facade that validates inputs, assigns identity, and persists records
/// through the injected repository.
pub struct RecordStore<S: WalletRepository> {
    storage: S,
    clock: Arc<dyn Clock>,
}

impl<S: WalletRepository> RecordStore<S> {
    pub fn new(storage: S, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Validates and stores a new transaction at the front of the list, then
    /// rewrites the persisted balance.
    ///
    /// Once the transaction list is saved the add has happened: a failure to
    /// rewrite the derived balance is logged, not returned.
    pub fn add_transaction(&self, input: TransactionInput) -> Result<Transaction, CoreError> {
        self.record(input).map(|(transaction, _)| transaction)
    }

    /// Same as [`Self::add_transaction`], also reporting the budget alert the
    /// new expense raised, if any. Budgets that cannot be read after the add
    /// yield no alert.
    pub fn add_transaction_with_alerts(
        &self,
        input: TransactionInput,
    ) -> Result<RecordedTransaction, CoreError> {
        let (transaction, transactions) = self.record(input)?;
        let alert = if transaction.is_expense() {
            match self.storage.load_budgets() {
                Ok(budgets) => BudgetService::alert_for_expense(
                    &budgets,
                    &transactions,
                    &transaction,
                    self.today(),
                ),
                Err(err) => {
                    warn!("skipping budget alert for {}: {}", transaction.id, err);
                    None
                }
            }
        } else {
            None
        };
        if let Some(alert) = &alert {
            debug!(
                "budget `{}` is {} at {:.1}%",
                alert.category, alert.status, alert.percentage
            );
        }
        Ok(RecordedTransaction { transaction, alert })
    }

    fn record(&self, input: TransactionInput) -> Result<(Transaction, Vec<Transaction>), CoreError> {
        input.validate()?;
        let transaction = Transaction::from_input(input, self.clock.now());
        let mut transactions = self.storage.load_transactions()?;
        transactions.insert(0, transaction.clone());
        self.storage.save_transactions(&transactions)?;
        let balance = BalanceService::compute(&transactions);
        if let Err(err) = self.storage.save_balance(balance) {
            warn!("recorded {} but could not persist balance: {}", transaction.id, err);
        }
        debug!(
            "recorded {} {} in `{}` (balance now {})",
            transaction.kind, transaction.amount, transaction.category, balance
        );
        Ok((transaction, transactions))
    }

    /// Creates the budget for a category, replacing any existing one in place.
    pub fn add_budget(&self, input: BudgetInput) -> Result<Budget, CoreError> {
        input.validate()?;
        let budget = Budget::from_input(input, self.clock.now());
        let mut budgets = self.storage.load_budgets()?;
        match budgets
            .iter_mut()
            .find(|existing| existing.category == budget.category)
        {
            Some(existing) => {
                debug!("replacing budget for `{}`", budget.category);
                *existing = budget.clone();
            }
            None => {
                debug!("adding budget for `{}`", budget.category);
                budgets.push(budget.clone());
            }
        }
        self.storage.save_budgets(&budgets)?;
        Ok(budget)
    }

    /// Removes the budget for `category`. Returns `false` when none existed.
    pub fn delete_budget(&self, category: ExpenseCategory) -> Result<bool, CoreError> {
        let mut budgets = self.storage.load_budgets()?;
        let before = budgets.len();
        budgets.retain(|budget| budget.category != category);
        if budgets.len() == before {
            debug!("no budget for `{}` to delete", category);
            return Ok(false);
        }
        self.storage.save_budgets(&budgets)?;
        debug!("deleted budget for `{}`", category);
        Ok(true)
    }

    pub fn list_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        self.storage.load_transactions()
    }

    pub fn list_budgets(&self) -> Result<Vec<Budget>, CoreError> {
        self.storage.load_budgets()
    }

    /// Balance folded from the stored transactions. The persisted scalar is
    /// only compared against the fold.
    pub fn balance(&self) -> Result<f64, CoreError> {
        let computed = BalanceService::compute(&self.storage.load_transactions()?);
        let persisted = self.storage.load_balance()?;
        if (computed - persisted).abs() > BALANCE_DRIFT_TOLERANCE {
            warn!(
                "persisted balance {} differs from computed balance {}",
                persisted, computed
            );
        }
        Ok(computed)
    }

    pub fn transactions_by_kind(&self, kind: TransactionKind) -> Result<Vec<Transaction>, CoreError> {
        let mut transactions = self.storage.load_transactions()?;
        transactions.retain(|txn| txn.kind == kind);
        Ok(transactions)
    }

    /// The `limit` most recently recorded transactions.
    pub fn recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>, CoreError> {
        let mut transactions = self.storage.load_transactions()?;
        transactions.truncate(limit);
        Ok(transactions)
    }

    /// One page of transactions ordered by date, newest first. Pages are
    /// 1-based; page 0 is treated as page 1.
    pub fn transactions_page(&self, page: usize, limit: usize) -> Result<TransactionPage, CoreError> {
        let page = page.max(1);
        let limit = limit.max(1);
        let mut transactions = self.storage.load_transactions()?;
        transactions.sort_by_key(|txn| Reverse(txn.date));
        let total = transactions.len();
        let total_pages = total.div_ceil(limit);
        let transactions = transactions
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();
        Ok(TransactionPage {
            transactions,
            total,
            current_page: page,
            total_pages,
        })
    }

    pub fn snapshot(&self) -> Result<WalletSnapshot, CoreError> {
        Ok(WalletSnapshot {
            transactions: self.storage.load_transactions()?,
            budgets: self.storage.load_budgets()?,
        })
    }

    /// Utilization of every stored budget for the period containing today.
    pub fn budget_tracking(&self) -> Result<Vec<BudgetTracking>, CoreError> {
        let snapshot = self.snapshot()?;
        Ok(BudgetService::track(
            &snapshot.budgets,
            &snapshot.transactions,
            self.today(),
        ))
    }
}
