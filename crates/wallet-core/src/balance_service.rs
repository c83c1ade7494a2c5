use wallet_domain::{Totals, Transaction};

pub struct BalanceService;

impl BalanceService {
    /// Income minus expenses over `transactions`. Empty input yields zero.
    pub fn compute(transactions: &[Transaction]) -> f64 {
        transactions.iter().map(Transaction::signed_amount).sum()
    }

    pub fn totals(transactions: &[Transaction]) -> Totals {
        transactions.iter().fold(Totals::default(), |mut totals, txn| {
            totals.record(txn);
            totals
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use wallet_domain::{Category, ExpenseCategory, IncomeCategory, TransactionInput, TransactionKind};

    fn txn(kind: TransactionKind, amount: f64) -> Transaction {
        let category = match kind {
            TransactionKind::Income => Category::Income(IncomeCategory::Salary),
            TransactionKind::Expense => Category::Expense(ExpenseCategory::Food),
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Transaction::from_input(
            TransactionInput::new(kind, amount, category, "entry", date),
            Utc::now(),
        )
    }

    #[test]
    fn empty_stream_has_zero_balance() {
        assert_eq!(BalanceService::compute(&[]), 0.0);
        assert_eq!(BalanceService::totals(&[]), Totals::default());
    }

    #[test]
    fn balance_is_order_independent() {
        let mut items = vec![
            txn(TransactionKind::Income, 1000.0),
            txn(TransactionKind::Expense, 250.0),
            txn(TransactionKind::Expense, 125.0),
        ];
        let forward = BalanceService::compute(&items);
        items.reverse();
        assert_eq!(forward, 625.0);
        assert_eq!(BalanceService::compute(&items), forward);

        let totals = BalanceService::totals(&items);
        assert_eq!(totals.income, 1000.0);
        assert_eq!(totals.expense, 375.0);
        assert_eq!(totals.balance, 625.0);
    }
}
