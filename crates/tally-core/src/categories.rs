//! Category registry
//!
//! Fixed, ordered sets of expense and income category labels. The sets are
//! disjoint per transaction type: a label is only valid for the type whose
//! registry it belongs to, and that pairing is enforced structurally by the
//! [`Category`] sum type at parse time.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Expense categories, in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Insurance")]
    Insurance,
    #[serde(rename = "Gifts & Donations")]
    GiftsDonations,
    #[serde(rename = "Other")]
    Other,
}

impl ExpenseCategory {
    /// Registry order: breakdowns and comparison rows are emitted in this order
    pub const ALL: [ExpenseCategory; 12] = [
        Self::FoodDining,
        Self::Transportation,
        Self::Shopping,
        Self::Entertainment,
        Self::BillsUtilities,
        Self::Healthcare,
        Self::Education,
        Self::Travel,
        Self::PersonalCare,
        Self::Insurance,
        Self::GiftsDonations,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::PersonalCare => "Personal Care",
            Self::Insurance => "Insurance",
            Self::GiftsDonations => "Gifts & Donations",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown expense category: {}", s))
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Income categories, in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeCategory {
    #[serde(rename = "Salary")]
    Salary,
    #[serde(rename = "Freelance")]
    Freelance,
    #[serde(rename = "Business")]
    Business,
    #[serde(rename = "Investment")]
    Investment,
    #[serde(rename = "Rental")]
    Rental,
    #[serde(rename = "Gift")]
    Gift,
    #[serde(rename = "Other")]
    Other,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 7] = [
        Self::Salary,
        Self::Freelance,
        Self::Business,
        Self::Investment,
        Self::Rental,
        Self::Gift,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Business => "Business",
            Self::Investment => "Investment",
            Self::Rental => "Rental",
            Self::Gift => "Gift",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for IncomeCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown income category: {}", s))
    }
}

impl std::fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated category, tagged with the transaction type it belongs to.
///
/// "Other" appears in both registries, so parsing a bare label is ambiguous;
/// callers must supply the transaction type via [`Category::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Expense(ExpenseCategory),
    Income(IncomeCategory),
}

impl Category {
    /// Parse a label against the registry for the given transaction type
    pub fn parse(kind: TransactionType, label: &str) -> Result<Self> {
        match kind {
            TransactionType::Expense => label
                .parse::<ExpenseCategory>()
                .map(Self::Expense)
                .map_err(|_| {
                    Error::InvalidData(format!(
                        "Invalid category for expense transaction: {}",
                        label
                    ))
                }),
            TransactionType::Income => label
                .parse::<IncomeCategory>()
                .map(Self::Income)
                .map_err(|_| {
                    Error::InvalidData(format!(
                        "Invalid category for income transaction: {}",
                        label
                    ))
                }),
        }
    }

    pub fn kind(&self) -> TransactionType {
        match self {
            Self::Expense(_) => TransactionType::Expense,
            Self::Income(_) => TransactionType::Income,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense(c) => c.as_str(),
            Self::Income(c) => c.as_str(),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
