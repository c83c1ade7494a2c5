use wallet_core::{CurrencyFormatter, DateFormatter, NotificationService};
use wallet_domain::{Category, PaymentMethod, Transaction, TransactionInput, TransactionKind};

use super::{parse_count, split_subcommand, unknown_subcommand, ParsedArgs};
use crate::cli::core::{parse_amount, parse_date, short_id, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn, TableRenderer};

pub(crate) const SUBCOMMANDS: &[&str] = &["add", "list", "recent"];

const USAGE: &str = "transaction <add|list|recent> ...";
const ADD_USAGE: &str =
    "transaction add <income|expense> <amount> <category> <description> [--date YYYY-MM-DD] [--method cash|card|bank|mobile] [--location TEXT]";
const DEFAULT_PAGE_SIZE: usize = 10;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "transaction",
        "Record and browse transactions",
        USAGE,
        cmd_transaction,
    )
    .with_subcommands(SUBCOMMANDS)]
}

fn cmd_transaction(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = split_subcommand(args, USAGE)?;
    match subcommand.as_str() {
        "add" => add(context, rest),
        "list" => list(context, rest),
        "recent" => recent(context, rest),
        other => unknown_subcommand("transaction", other),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["date", "method", "location"])?;
    let [kind, amount, category, description @ ..] = parsed.positional.as_slice() else {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    };
    if description.is_empty() {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    }

    let kind: TransactionKind = kind.parse().map_err(CommandError::InvalidArguments)?;
    let amount = parse_amount(amount)?;
    let category: Category = category
        .parse()
        .map_err(|err: wallet_domain::CategoryParseError| {
            CommandError::InvalidArguments(err.to_string())
        })?;
    let date = match parsed.option("date") {
        Some(value) => parse_date(value)?,
        None => context.today(),
    };

    let mut input = TransactionInput::new(kind, amount, category, description.join(" "), date);
    if let Some(method) = parsed.option("method") {
        let method: PaymentMethod = method.parse().map_err(CommandError::InvalidArguments)?;
        input = input.with_payment_method(method);
    }
    if let Some(location) = parsed.option("location") {
        input = input.with_location(location);
    }

    let recorded = context.store.add_transaction_with_alerts(input)?;
    let transaction = &recorded.transaction;
    io::print_success(format!(
        "Recorded {} of {} in {} ({}).",
        transaction.kind,
        context.formatters.format_amount(transaction.amount),
        transaction.category.label(),
        short_id(transaction.id)
    ));
    if let Some(alert) = &recorded.alert {
        io::print_warning(NotificationService::describe_alert(alert, &context.formatters));
    }
    Ok(())
}

fn list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["page", "limit"])?;
    if let Some(kind) = parsed.positional.first() {
        if parsed.option("page").is_some() || parsed.option("limit").is_some() {
            return Err(CommandError::InvalidArguments(
                "paging applies to the full list; drop the type filter".into(),
            ));
        }
        let kind: TransactionKind = kind.parse().map_err(CommandError::InvalidArguments)?;
        let transactions = context.store.transactions_by_kind(kind)?;
        if transactions.is_empty() {
            io::print_info(format!("No {kind} transactions recorded."));
            return Ok(());
        }
        render_transactions(context, &format!("{} transactions", capitalize(kind)), &transactions);
        return Ok(());
    }

    let page = parsed
        .option("page")
        .map(|value| parse_count(value, "page"))
        .transpose()?
        .unwrap_or(1);
    let limit = parsed
        .option("limit")
        .map(|value| parse_count(value, "limit"))
        .transpose()?
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let page = context.store.transactions_page(page, limit)?;
    if page.total == 0 {
        io::print_info("No transactions recorded yet.");
        return Ok(());
    }
    if page.transactions.is_empty() {
        io::print_info(format!(
            "Page {} is empty ({} page(s) available).",
            page.current_page, page.total_pages
        ));
        return Ok(());
    }
    render_transactions(
        context,
        &format!(
            "Transactions (page {} of {}, {} total)",
            page.current_page, page.total_pages, page.total
        ),
        &page.transactions,
    );
    Ok(())
}

fn recent(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(value) => parse_count(value, "limit")?,
        None => context.config_read().recent_limit,
    };
    let transactions = context.store.recent_transactions(limit)?;
    if transactions.is_empty() {
        io::print_info("No transactions recorded yet.");
        return Ok(());
    }
    render_transactions(context, "Recent transactions", &transactions);
    Ok(())
}

fn render_transactions(context: &ShellContext, title: &str, transactions: &[Transaction]) {
    let mut table = Table::new(
        Some(title),
        vec![
            TableColumn::new("ID", 8),
            TableColumn::new("Date", 10),
            TableColumn::new("Type", 7),
            TableColumn::new("Category", 16),
            TableColumn::new("Description", 20),
            TableColumn::new("Method", 6),
            TableColumn::numeric("Amount", 10),
        ],
    );
    for txn in transactions {
        table.add_row(vec![
            short_id(txn.id),
            context.formatters.format_date(txn.date),
            txn.kind.to_string(),
            format!("{} {}", txn.category.icon(), txn.category.label()),
            describe(txn),
            txn.payment_method.label().to_string(),
            context.formatters.format_amount(txn.signed_amount()),
        ]);
    }
    TableRenderer::render(&table);
}

fn describe(txn: &Transaction) -> String {
    match &txn.location {
        Some(location) => format!("{} @ {}", txn.description, location),
        None => txn.description.clone(),
    }
}

fn capitalize(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
    }
}
