mod common;

use std::{fs, sync::Arc};

use wallet::wallet_core::{FixedClock, RecordStore, WalletRepository};
use wallet::wallet_domain::{
    BudgetInput, BudgetPeriod, Category, ExpenseCategory, IncomeCategory, PaymentMethod,
    TransactionInput, TransactionKind,
};
use wallet::wallet_storage_json::JsonWalletStorage;

fn reopen(base: &std::path::Path) -> RecordStore<JsonWalletStorage> {
    let storage = JsonWalletStorage::new(base.to_path_buf()).expect("reopen storage");
    RecordStore::new(storage, Arc::new(FixedClock::at_date(common::today())))
}

#[test]
fn records_survive_a_restart() {
    let (store, _config, base) = common::setup_test_env();
    store
        .add_transaction(TransactionInput::new(
            TransactionKind::Income,
            3000.0,
            Category::Income(IncomeCategory::Freelance),
            "Logo design",
            common::today(),
        ))
        .unwrap();
    store
        .add_transaction(
            TransactionInput::new(
                TransactionKind::Expense,
                800.0,
                Category::Expense(ExpenseCategory::Transportation),
                "Moto rides",
                common::today(),
            )
            .with_payment_method(PaymentMethod::Mobile)
            .with_location("Kigali"),
        )
        .unwrap();
    store
        .add_budget(BudgetInput::new(
            ExpenseCategory::Transportation,
            1000.0,
            BudgetPeriod::Weekly,
        ))
        .unwrap();

    let reopened = reopen(&base);
    let transactions = reopened.list_transactions().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].description, "Moto rides");
    assert_eq!(transactions[0].location.as_deref(), Some("Kigali"));
    assert_eq!(reopened.balance().unwrap(), 2200.0);
    assert_eq!(reopened.storage().load_balance().unwrap(), 2200.0);

    let tracking = reopened.budget_tracking().unwrap();
    assert_eq!(tracking.len(), 1);
    assert_eq!(tracking[0].spent, 800.0);
    assert_eq!(tracking[0].percentage, 80.0);
}

#[test]
fn corrupt_documents_load_as_empty_and_are_replaced_on_write() {
    let (_store, _config, base) = common::setup_test_env();
    fs::write(base.join("wallet_transactions.json"), "{ not json").unwrap();
    fs::write(base.join("wallet_budgets.json"), "[1, 2").unwrap();

    let store = reopen(&base);
    assert!(store.list_transactions().unwrap().is_empty());
    assert!(store.list_budgets().unwrap().is_empty());

    store
        .add_budget(BudgetInput::monthly(ExpenseCategory::Housing, 250_000.0))
        .unwrap();
    let raw = fs::read_to_string(base.join("wallet_budgets.json")).unwrap();
    assert!(raw.contains("\"housing\""));
    assert!(!base.join("wallet_budgets.json.tmp").exists());
}

#[test]
fn config_and_wallet_documents_share_the_base_directory() {
    let (_store, config, base) = common::setup_test_env();
    let mut prefs = config.load().unwrap();
    prefs.set("recent_limit", "3").unwrap();
    config.save(&prefs).unwrap();

    assert_eq!(config.config_path(), base.join("config.json"));
    assert_eq!(config.load().unwrap().recent_limit, 3);
}
