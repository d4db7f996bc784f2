//! Budget operations
//!
//! Writes are upserts keyed on (user, category, month, year). The conflict
//! target is the unique index, so the insert-or-replace is atomic inside
//! SQLite and concurrent writers for the same key can never produce
//! duplicate rows.

use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::categories::ExpenseCategory;
use crate::error::{Error, Result};
use crate::models::Budget;
use crate::period::Period;

const BUDGET_COLUMNS: &str =
    "id, user_id, category, amount, month, year, created_at, updated_at";

impl Database {
    /// Insert or replace the budget for (user, category, period)
    pub fn upsert_budget(
        &self,
        user_id: i64,
        category: ExpenseCategory,
        amount: f64,
        period: Period,
    ) -> Result<Budget> {
        if amount <= 0.0 {
            return Err(Error::InvalidData(
                "Amount must be greater than 0".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO budgets (user_id, category, amount, month, year)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(user_id, category, month, year)
            DO UPDATE SET amount = excluded.amount, updated_at = CURRENT_TIMESTAMP
            "#,
            params![
                user_id,
                category.as_str(),
                amount,
                period.month(),
                period.year(),
            ],
        )?;

        let budget = conn.query_row(
            &format!(
                "SELECT {} FROM budgets WHERE user_id = ? AND category = ? AND month = ? AND year = ?",
                BUDGET_COLUMNS
            ),
            params![user_id, category.as_str(), period.month(), period.year()],
            row_to_budget,
        )?;

        Ok(budget)
    }

    /// List the user's budgets for one period, ordered by category label
    pub fn list_budgets(&self, user_id: i64, period: Period) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM budgets WHERE user_id = ? AND month = ? AND year = ? ORDER BY category",
            BUDGET_COLUMNS
        ))?;

        let budgets = stmt
            .query_map(params![user_id, period.month(), period.year()], row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    /// Fetch one budget owned by the user
    pub fn get_budget(&self, user_id: i64, id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                &format!("SELECT {} FROM budgets WHERE id = ? AND user_id = ?", BUDGET_COLUMNS),
                params![id, user_id],
                row_to_budget,
            )
            .optional()?;
        Ok(budget)
    }

    /// Delete a budget owned by the user
    pub fn delete_budget(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM budgets WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        if deleted == 0 {
            return Err(Error::NotFound("Budget not found".to_string()));
        }
        Ok(())
    }

    /// Count all budgets (for the status command)
    pub fn count_budgets(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM budgets", [], |row| row.get(0))?)
    }
}

fn row_to_budget(row: &Row<'_>) -> rusqlite::Result<Budget> {
    let label: String = row.get(2)?;
    let category = label
        .parse::<ExpenseCategory>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into()))?;

    Ok(Budget {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category,
        amount: row.get(3)?,
        month: row.get(4)?,
        year: row.get(5)?,
        created_at: parse_datetime(&row.get::<_, String>(6)?),
        updated_at: parse_datetime(&row.get::<_, String>(7)?),
    })
}
