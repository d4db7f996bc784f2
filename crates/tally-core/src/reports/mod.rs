//! Budget-vs-actual comparison and spending insights
//!
//! The engines are pure read-and-compute: they take their data-access
//! dependencies explicitly through the two traits below, so tests can run
//! them against in-memory fakes and the server runs them against
//! [`Database`].

use chrono::NaiveDate;

use crate::db::Database;
use crate::error::Result;
use crate::models::{Budget, CategoryAggregate};
use crate::period::Period;

mod comparison;
mod insights;

pub use comparison::ComparisonEngine;
pub use insights::InsightsEngine;

/// Per-category expense aggregation over an inclusive date range,
/// ordered by total descending
pub trait ExpenseTotals {
    fn expense_totals(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CategoryAggregate>>;
}

/// Budget rows for one user and period
pub trait BudgetSource {
    fn budgets(&self, user_id: i64, period: Period) -> Result<Vec<Budget>>;
}

impl ExpenseTotals for Database {
    fn expense_totals(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CategoryAggregate>> {
        self.expense_totals_by_category(user_id, from, to)
    }
}

impl BudgetSource for Database {
    fn budgets(&self, user_id: i64, period: Period) -> Result<Vec<Budget>> {
        self.list_budgets(user_id, period)
    }
}

/// Percentage change with an explicit zero guard: when the previous value is
/// zero the change reports as 0 rather than infinity. "No data" is therefore
/// indistinguishable from "no change" in the output.
pub(crate) fn percent_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}
