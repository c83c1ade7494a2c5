//! Aggregate shapes produced by the balance, chart and notification services.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{common::DateWindow, transaction::Transaction};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
/// Chart range selector.
pub enum Timeframe {
    /// Seven daily buckets ending today.
    #[default]
    Week,
    /// One daily bucket per day of the current month.
    Month,
    /// Twelve monthly buckets ending with the current month.
    Year,
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Timeframe::Week => "week",
            Timeframe::Month => "month",
            Timeframe::Year => "year",
        };
        f.write_str(label)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Timeframe::Week),
            "month" => Ok(Timeframe::Month),
            "year" => Ok(Timeframe::Year),
            other => Err(format!("unknown timeframe `{other}`")),
        }
    }
}

/// Income, expense and net balance over some set of transactions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl Totals {
    pub fn record(&mut self, transaction: &Transaction) {
        if transaction.is_income() {
            self.income += transaction.amount;
        } else {
            self.expense += transaction.amount;
        }
        self.balance = self.income - self.expense;
    }
}

/// One time slice of a chart series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub window: DateWindow,
    pub totals: Totals,
}

impl Bucket {
    pub fn empty(label: impl Into<String>, window: DateWindow) -> Self {
        Self {
            label: label.into(),
            window,
            totals: Totals::default(),
        }
    }

    pub fn record(&mut self, transaction: &Transaction) {
        self.totals.record(transaction);
    }
}

/// Per-month totals, keyed by the first day of the month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTotal {
    pub month: NaiveDate,
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_amount: f64,
}

/// One page of transactions ordered by date, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub total: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
/// Urgency of a derived notification.
pub enum Severity {
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn describe(self) -> &'static str {
        match self {
            Severity::Critical => "Critical Alert",
            Severity::High => "High Priority",
            Severity::Medium => "Medium Priority",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// A derived, non-persisted alert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    pub icon: String,
    pub message: String,
    pub severity: Severity,
}
