use wallet_domain::{BudgetAlert, BudgetStatus, BudgetTracking, Notification, Severity, Totals};

use crate::format::CurrencyFormatter;

const CRITICAL_SPENDING_PERCENT: f64 = 100.0;
const HIGH_SPENDING_PERCENT: f64 = 80.0;
const MEDIUM_SPENDING_PERCENT: f64 = 70.0;

pub struct NotificationService;

impl NotificationService {
    /// Expenses as a percentage of income. Zero income with any expense
    /// counts as fully spent; zero of both yields zero.
    pub fn spending_percent(totals: &Totals) -> f64 {
        if totals.income > 0.0 {
            totals.expense * 100.0 / totals.income
        } else if totals.expense > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    }

    /// Derives the spending-vs-income notice followed by one notice per
    /// budget in the warning or exceeded band.
    pub fn notifications(
        totals: &Totals,
        trackings: &[BudgetTracking],
        currency: &dyn CurrencyFormatter,
    ) -> Vec<Notification> {
        let mut notifications = Vec::new();
        let spending = Self::spending_percent(totals);
        if spending >= CRITICAL_SPENDING_PERCENT {
            notifications.push(Notification {
                id: "exceed-100".into(),
                icon: "🚨".into(),
                message: format!(
                    "Warning: Your expenses ({}) have exceeded your income ({})",
                    currency.format_amount(totals.expense),
                    currency.format_amount(totals.income)
                ),
                severity: Severity::Critical,
            });
        } else if spending >= HIGH_SPENDING_PERCENT {
            notifications.push(Notification {
                id: "exceed-80".into(),
                icon: "⚠️".into(),
                message: format!("Alert: Your expenses are at {spending:.1}% of your income"),
                severity: Severity::High,
            });
        } else if spending >= MEDIUM_SPENDING_PERCENT {
            notifications.push(Notification {
                id: "exceed-70".into(),
                icon: "⚠️".into(),
                message: format!("Notice: Your expenses have reached {spending:.1}% of your income"),
                severity: Severity::Medium,
            });
        }

        for tracking in trackings {
            let category = tracking.category();
            match tracking.status {
                BudgetStatus::Exceeded => notifications.push(Notification {
                    id: format!("budget-exceed-{}", category.slug()),
                    icon: "💸".into(),
                    message: format!(
                        "Budget Alert: Your {} spending ({}) has exceeded the budget limit ({})",
                        category.label(),
                        currency.format_amount(tracking.spent),
                        currency.format_amount(tracking.budget.budget_limit)
                    ),
                    severity: Severity::Critical,
                }),
                BudgetStatus::Warning => notifications.push(Notification {
                    id: format!("budget-warning-{}", category.slug()),
                    icon: "📊".into(),
                    message: format!(
                        "Budget Warning: Your {} spending is at {:.1}% of the budget",
                        category.label(),
                        tracking.percentage
                    ),
                    severity: Severity::High,
                }),
                BudgetStatus::Normal => {}
            }
        }
        notifications
    }

    /// One-line description of a budget alert raised by a new expense.
    pub fn describe_alert(alert: &BudgetAlert, currency: &dyn CurrencyFormatter) -> String {
        match alert.status {
            BudgetStatus::Exceeded => format!(
                "{}: your {} spending has exceeded the budget limit of {}",
                alert.title(),
                alert.category.label(),
                currency.format_amount(alert.limit)
            ),
            _ => format!(
                "{}: you've used {:.1}% of your {} budget",
                alert.title(),
                alert.percentage,
                alert.category.label()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::CurrencySettings;
    use chrono::{NaiveDate, Utc};
    use wallet_domain::{Budget, BudgetInput, DateWindow, ExpenseCategory};

    fn totals(income: f64, expense: f64) -> Totals {
        Totals {
            income,
            expense,
            balance: income - expense,
        }
    }

    fn tracking(category: ExpenseCategory, limit: f64, spent: f64) -> BudgetTracking {
        let budget = Budget::from_input(BudgetInput::monthly(category, limit), Utc::now());
        let window = DateWindow::month_containing(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        BudgetTracking::new(budget, window, spent)
    }

    #[test]
    fn spending_bands_pick_single_notice() {
        let rwf = CurrencySettings::default();
        let ids = |income, expense| {
            NotificationService::notifications(&totals(income, expense), &[], &rwf)
                .into_iter()
                .map(|note| (note.id, note.severity))
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(1000.0, 1000.0), vec![("exceed-100".to_string(), Severity::Critical)]);
        assert_eq!(ids(1000.0, 850.0), vec![("exceed-80".to_string(), Severity::High)]);
        assert_eq!(ids(1000.0, 700.0), vec![("exceed-70".to_string(), Severity::Medium)]);
        assert!(ids(1000.0, 699.0).is_empty());
    }

    #[test]
    fn zero_income_counts_as_overspent_only_with_expenses() {
        let rwf = CurrencySettings::default();
        let notes = NotificationService::notifications(&totals(0.0, 5.0), &[], &rwf);
        assert_eq!(notes[0].severity, Severity::Critical);
        assert!(notes[0].message.contains("RWF 5"));
        assert!(NotificationService::notifications(&totals(0.0, 0.0), &[], &rwf).is_empty());
    }

    #[test]
    fn budget_notices_follow_status() {
        let rwf = CurrencySettings::default();
        let trackings = vec![
            tracking(ExpenseCategory::Food, 500.0, 600.0),
            tracking(ExpenseCategory::Bills, 100.0, 85.0),
            tracking(ExpenseCategory::Travel, 100.0, 10.0),
        ];
        let notes = NotificationService::notifications(&Totals::default(), &trackings, &rwf);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, "budget-exceed-food");
        assert_eq!(notes[0].severity, Severity::Critical);
        assert_eq!(notes[1].id, "budget-warning-bills");
        assert!(notes[1].message.contains("85.0%"));
    }

    #[test]
    fn describes_alerts_by_status() {
        let rwf = CurrencySettings::default();
        let alert = BudgetAlert {
            category: ExpenseCategory::Food,
            status: BudgetStatus::Warning,
            percentage: 90.0,
            spent: 450.0,
            limit: 500.0,
        };
        assert_eq!(
            NotificationService::describe_alert(&alert, &rwf),
            "Budget Warning: you've used 90.0% of your Food & Dining budget"
        );
        let exceeded = BudgetAlert {
            status: BudgetStatus::Exceeded,
            ..alert
        };
        assert!(NotificationService::describe_alert(&exceeded, &rwf).contains("RWF 500"));
    }
}
