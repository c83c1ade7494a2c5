//! Domain models for wallet transactions.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::Category, common::*};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
/// Direction of a transaction relative to the wallet balance.
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Sign applied to the amount when folding into a balance.
    pub fn signum(self) -> f64 {
        match self {
            TransactionKind::Income => 1.0,
            TransactionKind::Expense => -1.0,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(TransactionKind::Income),
            "expense" | "out" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction type `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
/// How a transaction was settled.
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Bank,
    Mobile,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Bank => "Bank Transfer",
            PaymentMethod::Mobile => "Mobile Payment",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "bank" | "transfer" => Ok(PaymentMethod::Bank),
            "mobile" => Ok(PaymentMethod::Mobile),
            other => Err(format!("unknown payment method `{other}`")),
        }
    }
}

/// A recorded income or expense. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Materializes a validated input with a fresh identifier.
    pub fn from_input(input: TransactionInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: input.amount,
            kind: input.kind,
            category: input.category,
            description: input.description.trim().to_string(),
            date: input.date,
            payment_method: input.payment_method,
            location: input
                .location
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            created_at,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the balance sign applied.
    pub fn signed_amount(&self) -> f64 {
        self.kind.signum() * self.amount
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// User-supplied fields for a new transaction, before identity is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub location: Option<String>,
}

impl TransactionInput {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        category: Category,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            kind,
            category,
            description: description.into(),
            date,
            payment_method: PaymentMethod::default(),
            location: None,
        }
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Checks the invariants a stored transaction must satisfy.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(InputError::NonPositiveAmount(self.amount));
        }
        if self.category.kind() != self.kind {
            return Err(InputError::CategoryKindMismatch {
                category: self.category,
                kind: self.kind,
            });
        }
        if self.description.trim().is_empty() {
            return Err(InputError::EmptyField("description"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Validation failures for transaction and budget inputs.
pub enum InputError {
    NonPositiveAmount(f64),
    EmptyField(&'static str),
    CategoryKindMismatch {
        category: Category,
        kind: TransactionKind,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NonPositiveAmount(value) => {
                write!(f, "amount must be greater than zero (got {value})")
            }
            InputError::EmptyField(field) => write!(f, "{field} is required"),
            InputError::CategoryKindMismatch { category, kind } => {
                write!(f, "category `{category}` cannot be used for {kind} transactions")
            }
        }
    }
}

impl std::error::Error for InputError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{ExpenseCategory, IncomeCategory};

    fn sample_input() -> TransactionInput {
        TransactionInput::new(
            TransactionKind::Expense,
            12.5,
            Category::Expense(ExpenseCategory::Food),
            "Lunch",
            NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
        )
    }

    #[test]
    fn validate_rejects_bad_amounts() {
        for amount in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let mut input = sample_input();
            input.amount = amount;
            assert!(matches!(
                input.validate(),
                Err(InputError::NonPositiveAmount(_))
            ));
        }
    }

    #[test]
    fn validate_rejects_blank_description_and_kind_mismatch() {
        let mut blank = sample_input();
        blank.description = "   ".into();
        assert_eq!(blank.validate(), Err(InputError::EmptyField("description")));

        let mut mismatch = sample_input();
        mismatch.category = Category::Income(IncomeCategory::Salary);
        assert!(matches!(
            mismatch.validate(),
            Err(InputError::CategoryKindMismatch { .. })
        ));
    }

    #[test]
    fn wire_format_uses_type_and_iso_date() {
        let txn = Transaction::from_input(sample_input().with_location(" Kigali "), Utc::now());
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["category"], "food");
        assert_eq!(json["date"], "2024-04-02");
        assert_eq!(json["payment_method"], "cash");
        assert_eq!(json["location"], "Kigali");
        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, txn);
    }
}
