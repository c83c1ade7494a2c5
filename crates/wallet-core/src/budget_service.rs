use chrono::NaiveDate;
use wallet_domain::{
    Budget, BudgetAlert, BudgetStatus, BudgetTracking, CategoryLimit, DateWindow,
    ExpenseCategory, Transaction,
};

pub struct BudgetService;

impl BudgetService {
    /// Period window a budget is measured against on `today`.
    pub fn window_for(budget: &Budget, today: NaiveDate) -> DateWindow {
        budget.window_containing(today)
    }

    /// Sum of expenses in `category` dated inside `window`.
    pub fn spent_in_window(
        transactions: &[Transaction],
        category: ExpenseCategory,
        window: DateWindow,
    ) -> f64 {
        transactions
            .iter()
            .filter(|txn| txn.is_expense())
            .filter(|txn| txn.category.as_expense() == Some(category))
            .filter(|txn| window.contains(txn.date))
            .map(|txn| txn.amount)
            .sum()
    }

    pub fn track_one(budget: &Budget, transactions: &[Transaction], today: NaiveDate) -> BudgetTracking {
        let window = Self::window_for(budget, today);
        let spent = Self::spent_in_window(transactions, budget.category, window);
        BudgetTracking::new(budget.clone(), window, spent)
    }

    /// Utilization of every budget for the period containing `today`, in
    /// budget order.
    pub fn track(budgets: &[Budget], transactions: &[Transaction], today: NaiveDate) -> Vec<BudgetTracking> {
        budgets
            .iter()
            .map(|budget| Self::track_one(budget, transactions, today))
            .collect()
    }

    pub fn category_limits(
        budgets: &[Budget],
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Vec<CategoryLimit> {
        Self::track(budgets, transactions, today)
            .iter()
            .map(BudgetTracking::as_category_limit)
            .collect()
    }

    /// Alert raised by `new_txn` against its category budget.
    ///
    /// `transactions` must already contain `new_txn`. Returns `None` for
    /// income, for expenses without a budget, for expenses dated outside the
    /// budget's current window, and when the budget stays in the normal band.
    pub fn alert_for_expense(
        budgets: &[Budget],
        transactions: &[Transaction],
        new_txn: &Transaction,
        today: NaiveDate,
    ) -> Option<BudgetAlert> {
        let category = new_txn.category.as_expense()?;
        if !new_txn.is_expense() {
            return None;
        }
        let budget = budgets.iter().find(|budget| budget.category == category)?;
        let tracking = Self::track_one(budget, transactions, today);
        if !tracking.window.contains(new_txn.date) || tracking.status == BudgetStatus::Normal {
            return None;
        }
        Some(BudgetAlert {
            category,
            status: tracking.status,
            percentage: tracking.percentage,
            spent: tracking.spent,
            limit: budget.budget_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wallet_domain::{
        BudgetInput, BudgetPeriod, Category, IncomeCategory, TransactionInput, TransactionKind,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(category: ExpenseCategory, amount: f64, on: NaiveDate) -> Transaction {
        Transaction::from_input(
            TransactionInput::new(TransactionKind::Expense, amount, category.into(), "spend", on),
            Utc::now(),
        )
    }

    fn budget(category: ExpenseCategory, limit: f64, period: BudgetPeriod) -> Budget {
        Budget::from_input(BudgetInput::new(category, limit, period), Utc::now())
    }

    #[test]
    fn spent_counts_only_matching_category_inside_window() {
        let today = date(2024, 5, 15);
        let food = budget(ExpenseCategory::Food, 500.0, BudgetPeriod::Monthly);
        let transactions = vec![
            expense(ExpenseCategory::Food, 100.0, date(2024, 5, 1)),
            expense(ExpenseCategory::Food, 50.0, date(2024, 5, 31)),
            expense(ExpenseCategory::Food, 70.0, date(2024, 4, 30)),
            expense(ExpenseCategory::Travel, 300.0, date(2024, 5, 10)),
            Transaction::from_input(
                TransactionInput::new(
                    TransactionKind::Income,
                    900.0,
                    Category::Income(IncomeCategory::Salary),
                    "pay",
                    date(2024, 5, 2),
                ),
                Utc::now(),
            ),
        ];
        let tracking = BudgetService::track_one(&food, &transactions, today);
        assert_eq!(tracking.spent, 150.0);
        assert_eq!(tracking.remaining, 350.0);
        assert_eq!(tracking.percentage, 30.0);
        assert_eq!(tracking.status, BudgetStatus::Normal);
    }

    #[test]
    fn weekly_and_yearly_windows_follow_period() {
        // 2024-05-15 is a Wednesday.
        let today = date(2024, 5, 15);
        let transactions = vec![
            expense(ExpenseCategory::Food, 40.0, date(2024, 5, 13)),
            expense(ExpenseCategory::Food, 60.0, date(2024, 5, 12)),
            expense(ExpenseCategory::Food, 80.0, date(2024, 1, 2)),
        ];
        let weekly = budget(ExpenseCategory::Food, 100.0, BudgetPeriod::Weekly);
        let yearly = budget(ExpenseCategory::Food, 1000.0, BudgetPeriod::Yearly);
        let tracked = BudgetService::track(&[weekly, yearly], &transactions, today);
        assert_eq!(tracked[0].spent, 40.0);
        assert_eq!(tracked[1].spent, 180.0);
    }

    #[test]
    fn alert_only_for_in_window_expense_past_threshold() {
        let today = date(2024, 5, 15);
        let budgets = vec![budget(ExpenseCategory::Food, 500.0, BudgetPeriod::Monthly)];
        let first = expense(ExpenseCategory::Food, 300.0, today);
        let second = expense(ExpenseCategory::Food, 150.0, today);
        let stale = expense(ExpenseCategory::Food, 400.0, date(2024, 4, 3));

        let all = vec![first.clone()];
        assert!(BudgetService::alert_for_expense(&budgets, &all, &first, today).is_none());

        let all = vec![second.clone(), first.clone()];
        let alert = BudgetService::alert_for_expense(&budgets, &all, &second, today)
            .expect("warning alert");
        assert_eq!(alert.status, BudgetStatus::Warning);
        assert_eq!(alert.percentage, 90.0);

        let all = vec![stale.clone(), second, first];
        assert!(BudgetService::alert_for_expense(&budgets, &all, &stale, today).is_none());
    }

    #[test]
    fn reaching_the_limit_raises_exceeded_alert() {
        let today = date(2024, 5, 15);
        let budgets = vec![budget(ExpenseCategory::Food, 500.0, BudgetPeriod::Monthly)];
        let first = expense(ExpenseCategory::Food, 450.0, today);
        let exact = expense(ExpenseCategory::Food, 50.0, date(2024, 5, 2));

        let all = vec![exact.clone(), first.clone()];
        let alert = BudgetService::alert_for_expense(&budgets, &all, &exact, today)
            .expect("exceeded alert");
        assert_eq!(alert.status, BudgetStatus::Exceeded);
        assert_eq!(alert.percentage, 100.0);
        assert_eq!(alert.spent, 500.0);
        assert_eq!(alert.limit, 500.0);

        let over = expense(ExpenseCategory::Food, 100.0, today);
        let all = vec![over.clone(), exact, first];
        let alert = BudgetService::alert_for_expense(&budgets, &all, &over, today)
            .expect("exceeded alert");
        assert_eq!(alert.status, BudgetStatus::Exceeded);
        assert_eq!(alert.percentage, 120.0);
    }

    #[test]
    fn category_limits_mirror_tracking() {
        let today = date(2024, 5, 15);
        let budgets = vec![budget(ExpenseCategory::Bills, 200.0, BudgetPeriod::Monthly)];
        let limits = BudgetService::category_limits(
            &budgets,
            &[expense(ExpenseCategory::Bills, 20.0, today)],
            today,
        );
        assert_eq!(
            limits,
            vec![CategoryLimit {
                category: ExpenseCategory::Bills,
                limit: 200.0,
                spent: 20.0,
            }]
        );
    }
}
