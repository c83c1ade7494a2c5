use wallet_core::{BalanceService, BudgetService, CurrencyFormatter, NotificationService};

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "balance",
            "Show total income, expenses and balance",
            "balance",
            cmd_balance,
        ),
        CommandEntry::new(
            "notifications",
            "Show spending and budget alerts",
            "notifications",
            cmd_notifications,
        ),
    ]
}

fn cmd_balance(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let transactions = context.store.list_transactions()?;
    let totals = BalanceService::totals(&transactions);
    let balance = context.store.balance()?;
    let fmt = &context.formatters;

    output::section("Balance");
    io::print_info(format!("  Income   : {}", fmt.format_amount(totals.income)));
    io::print_info(format!("  Expenses : {}", fmt.format_amount(totals.expense)));
    io::print_info(format!("  Balance  : {}", fmt.format_amount(balance)));
    if transactions.is_empty() {
        io::print_hint("Record one with `transaction add`.");
    }
    Ok(())
}

fn cmd_notifications(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.store.snapshot()?;
    let totals = BalanceService::totals(&snapshot.transactions);
    let tracking = BudgetService::track(&snapshot.budgets, &snapshot.transactions, context.today());
    let notifications = NotificationService::notifications(&totals, &tracking, &context.formatters);

    if notifications.is_empty() {
        io::print_success("No alerts. Spending is on track.");
        return Ok(());
    }

    output::section(format!("Notifications ({})", notifications.len()));
    for notification in &notifications {
        let line = format!(
            "{} [{}] {}",
            notification.icon,
            notification.severity.describe(),
            notification.message
        );
        match notification.severity {
            wallet_domain::Severity::Medium => io::print_info(line),
            _ => io::print_warning(line),
        }
    }
    Ok(())
}
