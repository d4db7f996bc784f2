//! Domain models for Tally
//!
//! API-facing types serialize with camelCase field names to match the JSON
//! shape the web client consumes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::categories::{Category, ExpenseCategory, TransactionType};
use crate::error::{Error, Result};

/// A user of the tracker. Rows are created lazily the first time an
/// authenticated identity touches the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A financial transaction, owned by exactly one user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated transaction ready for insertion
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    pub category: Category,
}

impl NewTransaction {
    /// Validate the fields of a new transaction.
    ///
    /// The category label is checked against the registry for `kind`, so a
    /// constructed value always satisfies the type/category invariant.
    pub fn new(
        amount: f64,
        description: &str,
        date: NaiveDate,
        kind: TransactionType,
        category_label: &str,
    ) -> Result<Self> {
        if amount <= 0.0 {
            return Err(Error::InvalidData(
                "Amount must be greater than 0".to_string(),
            ));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::InvalidData("Description is required".to_string()));
        }
        let category = Category::parse(kind, category_label)?;
        Ok(Self {
            amount,
            description: description.to_string(),
            date,
            category,
        })
    }

    pub fn kind(&self) -> TransactionType {
        self.category.kind()
    }
}

/// Partial update to a transaction. Absent fields keep their current value;
/// the merged result is re-validated before being written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionUpdate {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
}

/// A monthly spending cap for one expense category.
///
/// At most one row exists per (user, category, month, year); writes go
/// through an atomic upsert keyed on that tuple.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Budget-vs-actual standing for one category in one period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    NoBudget,
    Under,
    Over,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoBudget => "no-budget",
            Self::Under => "under",
            Self::Over => "over",
        }
    }
}

/// One row of the budget-vs-actual comparison (derived, never persisted)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub category: ExpenseCategory,
    pub budget_amount: f64,
    pub actual_amount: f64,
    pub difference: f64,
    pub percentage: f64,
    pub transaction_count: i64,
    pub status: BudgetStatus,
}

/// Per-category expense aggregate over a date range
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAggregate {
    pub category: ExpenseCategory,
    pub total: f64,
    pub count: i64,
    pub average: f64,
}

/// A top spending category for the insights summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCategory {
    pub category: ExpenseCategory,
    pub amount: f64,
    pub transaction_count: i64,
    pub avg_transaction: f64,
}

/// Current-vs-previous month standing for one category
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryComparison {
    pub category: ExpenseCategory,
    pub current_amount: f64,
    pub previous_amount: f64,
    pub change: f64,
    pub transaction_count: i64,
    pub avg_transaction: f64,
}

/// Month-over-month spending insights (derived, never persisted)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingInsights {
    pub total_spending: f64,
    pub previous_month_spending: f64,
    pub month_over_month_change: f64,
    pub top_categories: Vec<TopCategory>,
    pub category_comparisons: Vec<CategoryComparison>,
}

/// One month of the zero-filled yearly expense chart
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyExpense {
    pub month: &'static str,
    pub amount: f64,
    pub count: i64,
}

/// One category of the zero-filled breakdown for a transaction type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdownRow {
    pub category: Category,
    pub amount: f64,
    pub count: i64,
}
