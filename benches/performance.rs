use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;
use wallet::wallet_core::{AggregationService, BudgetService, FixedClock, RecordStore};
use wallet::wallet_domain::{
    Budget, BudgetInput, BudgetPeriod, Category, ExpenseCategory, IncomeCategory, Timeframe,
    Transaction, TransactionInput, TransactionKind,
};
use wallet::wallet_storage_json::JsonWalletStorage;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
}

fn build_sample_transactions(count: usize) -> Vec<Transaction> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..count)
        .map(|idx| {
            let date = start + Duration::days((idx % 365) as i64);
            let input = if idx % 10 == 0 {
                TransactionInput::new(
                    TransactionKind::Income,
                    2_000.0,
                    Category::Income(IncomeCategory::Salary),
                    "Salary",
                    date,
                )
            } else {
                let category = ExpenseCategory::ALL[idx % ExpenseCategory::ALL.len()];
                TransactionInput::new(
                    TransactionKind::Expense,
                    50.0 + (idx % 100) as f64,
                    Category::Expense(category),
                    "Purchase",
                    date,
                )
            };
            Transaction::from_input(input, Utc::now())
        })
        .collect()
}

fn build_budgets() -> Vec<Budget> {
    ExpenseCategory::ALL
        .into_iter()
        .map(|category| {
            Budget::from_input(
                BudgetInput::new(category, 5_000.0, BudgetPeriod::Monthly),
                Utc::now(),
            )
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let transactions = build_sample_transactions(black_box(10_000));

    for timeframe in [Timeframe::Week, Timeframe::Month, Timeframe::Year] {
        c.bench_function(&format!("bucket_by_timeframe_{timeframe}_10k"), |b| {
            b.iter(|| {
                black_box(AggregationService::bucket_by_timeframe(
                    &transactions,
                    timeframe,
                    today(),
                ))
            })
        });
    }

    c.bench_function("group_by_category_10k", |b| {
        b.iter(|| black_box(AggregationService::group_by_category(&transactions)))
    });
}

fn bench_budget_tracking(c: &mut Criterion) {
    let transactions = build_sample_transactions(black_box(10_000));
    let budgets = build_budgets();

    c.bench_function("budget_track_10k", |b| {
        b.iter(|| black_box(BudgetService::track(&budgets, &transactions, today())))
    });
}

fn bench_json_store(c: &mut Criterion) {
    let dir = tempdir().expect("tempdir");
    let storage = JsonWalletStorage::new(dir.path().to_path_buf()).expect("storage");
    let store = RecordStore::new(storage, Arc::new(FixedClock::at_date(today())));
    for txn in build_sample_transactions(500) {
        let input = TransactionInput::new(txn.kind, txn.amount, txn.category, txn.description, txn.date);
        store.add_transaction(input).expect("seed transaction");
    }

    c.bench_function("json_list_transactions_500", |b| {
        b.iter(|| black_box(store.list_transactions().expect("load transactions")))
    });
}

criterion_group!(benches, bench_aggregation, bench_budget_tracking, bench_json_store);
criterion_main!(benches);
