use wallet_core::{AggregationService, CurrencyFormatter};
use wallet_domain::{Category, Timeframe};

use super::{require_args, split_subcommand, unknown_subcommand};
use crate::cli::core::{parse_date, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn, TableRenderer};

pub(crate) const SUBCOMMANDS: &[&str] = &["chart", "categories", "monthly", "range"];

const USAGE: &str = "report <chart|categories|monthly|range> ...";
const RANGE_USAGE: &str = "report range <start YYYY-MM-DD> <end YYYY-MM-DD>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "report",
        "Charts, category breakdowns and period totals",
        USAGE,
        cmd_report,
    )
    .with_subcommands(SUBCOMMANDS)]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = split_subcommand(args, USAGE)?;
    match subcommand.as_str() {
        "chart" => chart(context, rest),
        "categories" => categories(context),
        "monthly" => monthly(context),
        "range" => range(context, rest),
        other => unknown_subcommand("report", other),
    }
}

fn chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let timeframe = match args.first() {
        Some(value) => value
            .parse::<Timeframe>()
            .map_err(CommandError::InvalidArguments)?,
        None => Timeframe::default(),
    };
    let transactions = context.store.list_transactions()?;
    let buckets = AggregationService::bucket_by_timeframe(&transactions, timeframe, context.today());

    let mut table = Table::new(
        Some(format!("Income vs expenses ({timeframe})")),
        vec![
            TableColumn::new("Period", 7),
            TableColumn::numeric("Income", 10),
            TableColumn::numeric("Expense", 10),
            TableColumn::numeric("Balance", 10),
        ],
    );
    let fmt = &context.formatters;
    for bucket in &buckets {
        table.add_row(vec![
            bucket.label.clone(),
            fmt.format_amount(bucket.totals.income),
            fmt.format_amount(bucket.totals.expense),
            fmt.format_amount(bucket.totals.balance),
        ]);
    }
    TableRenderer::render(&table);
    Ok(())
}

fn categories(context: &mut ShellContext) -> CommandResult {
    let transactions = context.store.list_transactions()?;
    let totals = AggregationService::group_by_category(&transactions);
    if totals.is_empty() {
        io::print_info("No expenses recorded yet.");
        return Ok(());
    }

    let overall: f64 = totals.values().sum();
    let mut rows: Vec<(Category, f64)> = totals.into_iter().collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut table = Table::new(
        Some("Spending by category"),
        vec![
            TableColumn::new("Category", 18),
            TableColumn::numeric("Amount", 10),
            TableColumn::numeric("Share", 6),
        ],
    );
    for (category, amount) in rows {
        table.add_row(vec![
            format!("{} {}", category.icon(), category.label()),
            context.formatters.format_amount(amount),
            format!("{:.1}%", amount * 100.0 / overall),
        ]);
    }
    TableRenderer::render(&table);
    Ok(())
}

fn monthly(context: &mut ShellContext) -> CommandResult {
    let transactions = context.store.list_transactions()?;
    let months = AggregationService::monthly_totals(&transactions);
    if months.is_empty() {
        io::print_info("No transactions recorded yet.");
        return Ok(());
    }

    let mut table = Table::new(
        Some("Monthly totals"),
        vec![
            TableColumn::new("Month", 8),
            TableColumn::numeric("Income", 10),
            TableColumn::numeric("Expenses", 10),
            TableColumn::numeric("Net", 10),
        ],
    );
    let fmt = &context.formatters;
    for month in &months {
        table.add_row(vec![
            month.month.format("%b %Y").to_string(),
            fmt.format_amount(month.total_income),
            fmt.format_amount(month.total_expenses),
            fmt.format_amount(month.net_amount),
        ]);
    }
    TableRenderer::render(&table);
    Ok(())
}

fn range(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, RANGE_USAGE)?;
    let first = parse_date(args[0])?;
    let last = parse_date(args[1])?;
    let transactions = context.store.list_transactions()?;
    let totals = AggregationService::range_totals(&transactions, first, last)?;

    let fmt = &context.formatters;
    output::section(format!(
        "{} to {}",
        fmt.format_long_date(first),
        fmt.format_long_date(last)
    ));
    io::print_info(format!("  Income   : {}", fmt.format_amount(totals.income)));
    io::print_info(format!("  Expenses : {}", fmt.format_amount(totals.expense)));
    io::print_info(format!("  Net      : {}", fmt.format_amount(totals.balance)));
    Ok(())
}
