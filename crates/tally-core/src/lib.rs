//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Database access and migrations
//! - Category registry for expense and income classification
//! - Budget-vs-actual comparison engine
//! - Month-over-month spending insights engine

pub mod categories;
pub mod db;
pub mod error;
pub mod models;
pub mod period;
pub mod reports;

pub use categories::{Category, ExpenseCategory, IncomeCategory, TransactionType};
pub use db::Database;
pub use error::{Error, Result};
pub use models::{
    Budget, BudgetStatus, CategoryAggregate, CategoryBreakdownRow, CategoryComparison,
    ComparisonRow, MonthlyExpense, NewTransaction, SpendingInsights, TopCategory, Transaction,
    TransactionUpdate, User,
};
pub use period::Period;
pub use reports::{BudgetSource, ComparisonEngine, ExpenseTotals, InsightsEngine};
