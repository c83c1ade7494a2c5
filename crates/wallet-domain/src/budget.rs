//! Budget definitions and the derived tracking/status shapes.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    category::ExpenseCategory,
    common::*,
    transaction::InputError,
};

/// Utilization at or above which a budget is in the warning band.
pub const WARNING_THRESHOLD_PERCENT: f64 = 80.0;
/// Utilization at or above which a budget is exceeded.
pub const EXCEEDED_THRESHOLD_PERCENT: f64 = 100.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "lowercase")]
/// Enumerates budgeting cadences.
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    /// Calendar window of this cadence that contains `reference`.
    pub fn window_containing(self, reference: NaiveDate) -> DateWindow {
        match self {
            BudgetPeriod::Weekly => DateWindow::week_containing(reference),
            BudgetPeriod::Monthly => DateWindow::month_containing(reference),
            BudgetPeriod::Yearly => DateWindow::year_containing(reference),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetPeriod::Weekly => "Weekly",
            BudgetPeriod::Monthly => "Monthly",
            BudgetPeriod::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

impl FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" => Ok(BudgetPeriod::Weekly),
            "monthly" | "month" => Ok(BudgetPeriod::Monthly),
            "yearly" | "year" | "annual" => Ok(BudgetPeriod::Yearly),
            other => Err(format!("unknown budget period `{other}`")),
        }
    }
}

/// A spending ceiling for one expense category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub category: ExpenseCategory,
    pub budget_limit: f64,
    #[serde(default)]
    pub period: BudgetPeriod,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    pub fn from_input(input: BudgetInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: input.category,
            budget_limit: input.budget_limit,
            period: input.period,
            created_at,
        }
    }

    /// Window the budget is measured against on `reference`.
    pub fn window_containing(&self, reference: NaiveDate) -> DateWindow {
        self.period.window_containing(reference)
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// User-supplied fields for a budget upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetInput {
    pub category: ExpenseCategory,
    pub budget_limit: f64,
    pub period: BudgetPeriod,
}

impl BudgetInput {
    pub fn new(category: ExpenseCategory, budget_limit: f64, period: BudgetPeriod) -> Self {
        Self {
            category,
            budget_limit,
            period,
        }
    }

    pub fn monthly(category: ExpenseCategory, budget_limit: f64) -> Self {
        Self::new(category, budget_limit, BudgetPeriod::Monthly)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if !self.budget_limit.is_finite() || self.budget_limit <= 0.0 {
            return Err(InputError::NonPositiveAmount(self.budget_limit));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
/// Utilization band of a budget.
pub enum BudgetStatus {
    Normal,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    /// Classifies a utilization percentage against the fixed thresholds.
    pub fn classify(percentage: f64) -> Self {
        if percentage >= EXCEEDED_THRESHOLD_PERCENT {
            BudgetStatus::Exceeded
        } else if percentage >= WARNING_THRESHOLD_PERCENT {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Normal
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            BudgetStatus::Normal => "Within budget",
            BudgetStatus::Warning => "Approaching limit",
            BudgetStatus::Exceeded => "Budget exceeded",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::Normal => "normal",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Exceeded => "exceeded",
        };
        f.write_str(label)
    }
}

/// Utilization percentage of `limit` consumed by `spent`.
///
/// A non-positive limit yields `f64::INFINITY`.
pub fn utilization_percent(spent: f64, limit: f64) -> f64 {
    if limit <= 0.0 {
        return f64::INFINITY;
    }
    spent * 100.0 / limit
}

/// Category ceiling paired with the amount spent in the current window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryLimit {
    pub category: ExpenseCategory,
    pub limit: f64,
    pub spent: f64,
}

/// Budget utilization for the window containing the reference date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetTracking {
    pub budget: Budget,
    pub window: DateWindow,
    pub spent: f64,
    pub remaining: f64,
    pub percentage: f64,
    pub status: BudgetStatus,
}

impl BudgetTracking {
    pub fn new(budget: Budget, window: DateWindow, spent: f64) -> Self {
        let percentage = utilization_percent(spent, budget.budget_limit);
        Self {
            remaining: budget.budget_limit - spent,
            status: BudgetStatus::classify(percentage),
            budget,
            window,
            spent,
            percentage,
        }
    }

    pub fn category(&self) -> ExpenseCategory {
        self.budget.category
    }

    pub fn as_category_limit(&self) -> CategoryLimit {
        CategoryLimit {
            category: self.budget.category,
            limit: self.budget.budget_limit,
            spent: self.spent,
        }
    }
}

/// One-shot event raised when a new expense leaves its budget in the
/// warning or exceeded band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetAlert {
    pub category: ExpenseCategory,
    pub status: BudgetStatus,
    pub percentage: f64,
    pub spent: f64,
    pub limit: f64,
}

impl BudgetAlert {
    pub fn title(&self) -> &'static str {
        match self.status {
            BudgetStatus::Exceeded => "Budget Exceeded",
            _ => "Budget Warning",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(limit: f64) -> Budget {
        Budget::from_input(BudgetInput::monthly(ExpenseCategory::Food, limit), Utc::now())
    }

    fn window() -> DateWindow {
        DateWindow::month_containing(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
    }

    #[test]
    fn classification_boundaries_are_exact() {
        assert_eq!(BudgetTracking::new(budget(500.0), window(), 400.0).status, BudgetStatus::Warning);
        assert_eq!(BudgetTracking::new(budget(500.0), window(), 500.0).status, BudgetStatus::Exceeded);
        assert_eq!(
            BudgetTracking::new(budget(500.0), window(), 399.995).status,
            BudgetStatus::Normal
        );
        assert_eq!(BudgetStatus::classify(79.999), BudgetStatus::Normal);
        assert_eq!(BudgetStatus::classify(80.0), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::classify(100.0), BudgetStatus::Exceeded);
    }

    #[test]
    fn zero_limit_yields_infinite_sentinel() {
        let tracking = BudgetTracking::new(budget(0.0), window(), 0.0);
        assert!(tracking.percentage.is_infinite());
        assert_eq!(tracking.status, BudgetStatus::Exceeded);
    }

    #[test]
    fn input_rejects_non_positive_limits() {
        assert!(BudgetInput::monthly(ExpenseCategory::Food, 0.0).validate().is_err());
        assert!(BudgetInput::monthly(ExpenseCategory::Food, -10.0).validate().is_err());
        assert!(BudgetInput::monthly(ExpenseCategory::Food, 10.0).validate().is_ok());
    }
}
