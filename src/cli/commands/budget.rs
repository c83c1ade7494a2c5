use wallet_core::CurrencyFormatter;
use wallet_domain::{BudgetInput, BudgetPeriod, BudgetStatus, Category, ExpenseCategory};

use super::{require_args, split_subcommand, unknown_subcommand};
use crate::cli::core::{parse_amount, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn, TableRenderer};

pub(crate) const SUBCOMMANDS: &[&str] = &["set", "remove", "list"];

const USAGE: &str = "budget <set|remove|list> ...";
const SET_USAGE: &str = "budget set <category> <limit> [weekly|monthly|yearly]";
const REMOVE_USAGE: &str = "budget remove <category>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "budget",
        "Manage per-category spending budgets",
        USAGE,
        cmd_budget,
    )
    .with_subcommands(SUBCOMMANDS)]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (subcommand, rest) = split_subcommand(args, USAGE)?;
    match subcommand.as_str() {
        "set" => set(context, rest),
        "remove" | "delete" => remove(context, rest),
        "list" => list(context),
        other => unknown_subcommand("budget", other),
    }
}

pub(crate) fn parse_expense_category(input: &str) -> Result<ExpenseCategory, CommandError> {
    let category: Category = input
        .parse()
        .map_err(|err: wallet_domain::CategoryParseError| {
            CommandError::InvalidArguments(err.to_string())
        })?;
    category.as_expense().ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "budgets apply to expense categories; `{}` is an income category",
            category.slug()
        ))
    })
}

fn set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, SET_USAGE)?;
    let category = parse_expense_category(args[0])?;
    let limit = parse_amount(args[1])?;
    let period = match args.get(2) {
        Some(value) => value.parse::<BudgetPeriod>(),
        None => context.config_read().default_budget_period.parse::<BudgetPeriod>(),
    }
    .map_err(CommandError::InvalidArguments)?;

    let budget = context
        .store
        .add_budget(BudgetInput::new(category, limit, period))?;
    io::print_success(format!(
        "{} budget for {} set to {}.",
        budget.period,
        budget.category.label(),
        context.formatters.format_amount(budget.budget_limit)
    ));
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, REMOVE_USAGE)?;
    let category = parse_expense_category(args[0])?;

    if context.can_prompt() {
        let prompt = format!("Remove the {} budget?", category.label());
        if !io::confirm_action(&context.theme, &prompt, false)? {
            io::print_info("Budget kept.");
            return Ok(());
        }
    }

    if context.store.delete_budget(category)? {
        io::print_success(format!("Removed the {} budget.", category.label()));
    } else {
        io::print_info(format!("No budget set for {}.", category.label()));
    }
    Ok(())
}

fn list(context: &mut ShellContext) -> CommandResult {
    let tracking = context.store.budget_tracking()?;
    if tracking.is_empty() {
        io::print_info("No budgets set. Use `budget set <category> <limit>` to add one.");
        return Ok(());
    }

    let mut table = Table::new(
        Some(format!("Budgets as of {}", context.today())),
        vec![
            TableColumn::new("Category", 16),
            TableColumn::new("Period", 8),
            TableColumn::new("Window", 23),
            TableColumn::numeric("Limit", 10),
            TableColumn::numeric("Spent", 10),
            TableColumn::numeric("Remaining", 10),
            TableColumn::numeric("Used", 7),
            TableColumn::new("Status", 18),
        ],
    );
    for entry in &tracking {
        let category = entry.category();
        table.add_row(vec![
            format!("{} {}", category.icon(), category.label()),
            entry.budget.period.to_string(),
            format!("{} .. {}", entry.window.start, entry.window.last_day()),
            context.formatters.format_amount(entry.budget.budget_limit),
            context.formatters.format_amount(entry.spent),
            context.formatters.format_amount(entry.remaining),
            format_percentage(entry.percentage),
            entry.status.describe().to_string(),
        ]);
    }
    TableRenderer::render(&table);

    let flagged = tracking
        .iter()
        .filter(|entry| entry.status != BudgetStatus::Normal)
        .count();
    if flagged > 0 {
        io::print_warning(format!("{flagged} budget(s) need attention."));
    }
    Ok(())
}

pub(crate) fn format_percentage(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.1}%")
    } else {
        "n/a".into()
    }
}
