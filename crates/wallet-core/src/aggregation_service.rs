use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use wallet_domain::{
    first_of_month, shift_month, Bucket, Category, DateWindow, MonthlyTotal, Timeframe, Totals,
    Transaction,
};

use crate::CoreError;

const DAY_LABEL: &str = "%-d %b";
const MONTH_LABEL: &str = "%b";

pub struct AggregationService;

impl AggregationService {
    /// Empty, chronologically ordered buckets for `timeframe` relative to `today`.
    pub fn buckets_for(timeframe: Timeframe, today: NaiveDate) -> Vec<Bucket> {
        match timeframe {
            Timeframe::Week => (0..7)
                .rev()
                .map(|offset| today - Duration::days(offset))
                .map(|day| Bucket::empty(day.format(DAY_LABEL).to_string(), DateWindow::day(day)))
                .collect(),
            Timeframe::Month => DateWindow::month_containing(today)
                .days()
                .map(|day| Bucket::empty(day.format(DAY_LABEL).to_string(), DateWindow::day(day)))
                .collect(),
            Timeframe::Year => {
                let current = first_of_month(today);
                (0..12)
                    .rev()
                    .map(|offset| shift_month(current, -offset))
                    .map(|month| {
                        Bucket::empty(
                            month.format(MONTH_LABEL).to_string(),
                            DateWindow::month_containing(month),
                        )
                    })
                    .collect()
            }
        }
    }

    /// Chart series for `timeframe`. Transactions outside every bucket are ignored.
    pub fn bucket_by_timeframe(
        transactions: &[Transaction],
        timeframe: Timeframe,
        today: NaiveDate,
    ) -> Vec<Bucket> {
        let mut buckets = Self::buckets_for(timeframe, today);
        for txn in transactions {
            let index = buckets.partition_point(|bucket| bucket.window.start <= txn.date);
            if index == 0 {
                continue;
            }
            let bucket = &mut buckets[index - 1];
            if bucket.window.contains(txn.date) {
                bucket.record(txn);
            }
        }
        buckets
    }

    /// Expense totals per category. Categories without expenses are absent.
    pub fn group_by_category(transactions: &[Transaction]) -> BTreeMap<Category, f64> {
        let mut totals = BTreeMap::new();
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            *totals.entry(txn.category).or_insert(0.0) += txn.amount;
        }
        totals
    }

    /// Income, expense and net per calendar month, oldest month first.
    pub fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
        let mut months: BTreeMap<NaiveDate, Totals> = BTreeMap::new();
        for txn in transactions {
            months.entry(first_of_month(txn.date)).or_default().record(txn);
        }
        months
            .into_iter()
            .map(|(month, totals)| MonthlyTotal {
                month,
                total_income: totals.income,
                total_expenses: totals.expense,
                net_amount: totals.balance,
            })
            .collect()
    }

    /// Totals over the inclusive date range `first..=last`.
    pub fn range_totals(
        transactions: &[Transaction],
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Totals, CoreError> {
        let window = DateWindow::inclusive(first, last)?;
        Ok(transactions
            .iter()
            .filter(|txn| window.contains(txn.date))
            .fold(Totals::default(), |mut totals, txn| {
                totals.record(txn);
                totals
            }))
    }
}
