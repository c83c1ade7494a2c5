//! Closed category catalogue for income and expense transactions.

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::transaction::TransactionKind;

/// Categories available to income transactions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    Salary,
    Freelance,
    Investments,
    Gifts,
    OtherIncome,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 5] = [
        IncomeCategory::Salary,
        IncomeCategory::Freelance,
        IncomeCategory::Investments,
        IncomeCategory::Gifts,
        IncomeCategory::OtherIncome,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            IncomeCategory::Salary => "salary",
            IncomeCategory::Freelance => "freelance",
            IncomeCategory::Investments => "investments",
            IncomeCategory::Gifts => "gifts",
            IncomeCategory::OtherIncome => "other_income",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IncomeCategory::Salary => "Salary",
            IncomeCategory::Freelance => "Freelance",
            IncomeCategory::Investments => "Investments",
            IncomeCategory::Gifts => "Gifts",
            IncomeCategory::OtherIncome => "Other Income",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            IncomeCategory::Salary => "💰",
            IncomeCategory::Freelance => "💼",
            IncomeCategory::Investments => "📈",
            IncomeCategory::Gifts => "🎁",
            IncomeCategory::OtherIncome => "💵",
        }
    }
}

/// Categories available to expense transactions and budgets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Food,
    Transportation,
    Shopping,
    Entertainment,
    Bills,
    Housing,
    Healthcare,
    Education,
    Travel,
    OtherExpenses,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 10] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transportation,
        ExpenseCategory::Shopping,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Bills,
        ExpenseCategory::Housing,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Education,
        ExpenseCategory::Travel,
        ExpenseCategory::OtherExpenses,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transportation => "transportation",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Bills => "bills",
            ExpenseCategory::Housing => "housing",
            ExpenseCategory::Healthcare => "healthcare",
            ExpenseCategory::Education => "education",
            ExpenseCategory::Travel => "travel",
            ExpenseCategory::OtherExpenses => "other_expenses",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food & Dining",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Bills => "Bills & Utilities",
            ExpenseCategory::Housing => "Housing",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::OtherExpenses => "Other Expenses",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ExpenseCategory::Food => "🍽️",
            ExpenseCategory::Transportation => "🚗",
            ExpenseCategory::Shopping => "🛍️",
            ExpenseCategory::Entertainment => "🎬",
            ExpenseCategory::Bills => "📱",
            ExpenseCategory::Housing => "🏠",
            ExpenseCategory::Healthcare => "🏥",
            ExpenseCategory::Education => "📚",
            ExpenseCategory::Travel => "✈️",
            ExpenseCategory::OtherExpenses => "📝",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ExpenseCategory {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.parse::<Category>()? {
            Category::Expense(category) => Ok(category),
            Category::Income(category) => Err(CategoryParseError::WrongKind {
                category: category.slug().to_string(),
                expected: TransactionKind::Expense,
            }),
        }
    }
}

/// Tagged union over the income and expense catalogues.
///
/// Serialized as the bare slug (`"food"`, `"salary"`); slugs are unique
/// across both catalogues so the kind is recoverable on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Income(IncomeCategory),
    Expense(ExpenseCategory),
}

impl Category {
    /// Transaction kind the category belongs to.
    pub fn kind(self) -> TransactionKind {
        match self {
            Category::Income(_) => TransactionKind::Income,
            Category::Expense(_) => TransactionKind::Expense,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Category::Income(category) => category.slug(),
            Category::Expense(category) => category.slug(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Income(category) => category.label(),
            Category::Expense(category) => category.label(),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Income(category) => category.icon(),
            Category::Expense(category) => category.icon(),
        }
    }

    pub fn as_expense(self) -> Option<ExpenseCategory> {
        match self {
            Category::Expense(category) => Some(category),
            Category::Income(_) => None,
        }
    }
}

impl From<ExpenseCategory> for Category {
    fn from(category: ExpenseCategory) -> Self {
        Category::Expense(category)
    }
}

impl From<IncomeCategory> for Category {
    fn from(category: IncomeCategory) -> Self {
        Category::Income(category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        if normalized.is_empty() {
            return Err(CategoryParseError::Empty);
        }
        if let Some(found) = IncomeCategory::ALL
            .into_iter()
            .find(|candidate| candidate.slug() == normalized)
        {
            return Ok(Category::Income(found));
        }
        ExpenseCategory::ALL
            .into_iter()
            .find(|candidate| candidate.slug() == normalized)
            .map(Category::Expense)
            .ok_or_else(|| CategoryParseError::Unknown(value.trim().to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reasons a category string is rejected at the boundary.
pub enum CategoryParseError {
    Empty,
    Unknown(String),
    WrongKind {
        category: String,
        expected: TransactionKind,
    },
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryParseError::Empty => f.write_str("category is required"),
            CategoryParseError::Unknown(value) => write!(f, "unknown category `{value}`"),
            CategoryParseError::WrongKind { category, expected } => {
                write!(f, "category `{category}` is not an {expected} category")
            }
        }
    }
}

impl std::error::Error for CategoryParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slugs_and_labels_loosely() {
        assert_eq!(
            "Food".parse::<Category>(),
            Ok(Category::Expense(ExpenseCategory::Food))
        );
        assert_eq!(
            " other-income ".parse::<Category>(),
            Ok(Category::Income(IncomeCategory::OtherIncome))
        );
        assert_eq!("".parse::<Category>(), Err(CategoryParseError::Empty));
        assert!(matches!(
            "lottery".parse::<Category>(),
            Err(CategoryParseError::Unknown(_))
        ));
    }

    #[test]
    fn expense_parse_rejects_income_slug() {
        let err = "salary".parse::<ExpenseCategory>().unwrap_err();
        assert!(matches!(err, CategoryParseError::WrongKind { .. }));
    }

    #[test]
    fn serializes_as_bare_slug() {
        let json = serde_json::to_string(&Category::Expense(ExpenseCategory::OtherExpenses)).unwrap();
        assert_eq!(json, "\"other_expenses\"");
        let back: Category = serde_json::from_str("\"salary\"").unwrap();
        assert_eq!(back.kind(), TransactionKind::Income);
    }
}
