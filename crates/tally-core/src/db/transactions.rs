//! Transaction operations

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::categories::{Category, ExpenseCategory, IncomeCategory, TransactionType};
use crate::error::{Error, Result};
use crate::models::{
    CategoryAggregate, CategoryBreakdownRow, MonthlyExpense, NewTransaction, Transaction,
    TransactionUpdate,
};

/// Short month labels for the yearly expense chart
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const TX_COLUMNS: &str =
    "id, user_id, amount, description, date, kind, category, created_at, updated_at";

impl Database {
    /// Insert a transaction and return the stored row
    pub fn insert_transaction(&self, user_id: i64, tx: &NewTransaction) -> Result<Transaction> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (user_id, amount, description, date, kind, category)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                tx.amount,
                tx.description,
                tx.date.to_string(),
                tx.kind().as_str(),
                tx.category.as_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        self.get_transaction(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction {} not found", id)))
    }

    /// Fetch one transaction owned by the user
    pub fn get_transaction(&self, user_id: i64, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!("SELECT {} FROM transactions WHERE id = ? AND user_id = ?", TX_COLUMNS),
                params![id, user_id],
                row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    /// List the user's transactions, newest first
    pub fn list_transactions(&self, user_id: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE user_id = ? ORDER BY date DESC, id DESC",
            TX_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(params![user_id], row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Apply a partial update to a transaction owned by the user.
    ///
    /// The merged row is re-validated as a whole, so an update cannot leave
    /// behind a category that is invalid for the (possibly changed) type.
    pub fn update_transaction(
        &self,
        user_id: i64,
        id: i64,
        update: &TransactionUpdate,
    ) -> Result<Transaction> {
        let existing = self
            .get_transaction(user_id, id)?
            .ok_or_else(|| Error::NotFound("Transaction not found".to_string()))?;

        let kind = update.kind.unwrap_or(existing.kind);
        let category_label = update
            .category
            .as_deref()
            .unwrap_or(existing.category.as_str());
        let merged = NewTransaction::new(
            update.amount.unwrap_or(existing.amount),
            update.description.as_deref().unwrap_or(&existing.description),
            update.date.unwrap_or(existing.date),
            kind,
            category_label,
        )?;

        let conn = self.conn()?;
        conn.execute(
            r#"
            UPDATE transactions
            SET amount = ?, description = ?, date = ?, kind = ?, category = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ? AND user_id = ?
            "#,
            params![
                merged.amount,
                merged.description,
                merged.date.to_string(),
                merged.kind().as_str(),
                merged.category.as_str(),
                id,
                user_id,
            ],
        )?;

        self.get_transaction(user_id, id)?
            .ok_or_else(|| Error::NotFound("Transaction not found".to_string()))
    }

    /// Delete a transaction owned by the user
    pub fn delete_transaction(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        if deleted == 0 {
            return Err(Error::NotFound("Transaction not found".to_string()));
        }
        Ok(())
    }

    /// Per-category expense aggregates (sum, count, average) over an inclusive
    /// date range, ordered by total descending. Categories with no spend are
    /// not included; the engines zero-fill from the registry where needed.
    pub fn expense_totals_by_category(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CategoryAggregate>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT category, SUM(amount), COUNT(*), AVG(amount)
            FROM transactions
            WHERE user_id = ? AND kind = 'expense' AND date BETWEEN ? AND ?
            GROUP BY category
            ORDER BY SUM(amount) DESC
            "#,
        )?;

        let aggregates = stmt
            .query_map(
                params![user_id, from.to_string(), to.to_string()],
                |row| {
                    let label: String = row.get(0)?;
                    let category = label.parse::<ExpenseCategory>().map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(0, Type::Text, e.into())
                    })?;
                    Ok(CategoryAggregate {
                        category,
                        total: row.get(1)?,
                        count: row.get(2)?,
                        average: row.get(3)?,
                    })
                },
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(aggregates)
    }

    /// Expense totals for each month of a calendar year, zero-filled to 12 rows
    pub fn monthly_expenses(&self, user_id: i64, year: i32) -> Result<Vec<MonthlyExpense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT CAST(strftime('%m', date) AS INTEGER), SUM(amount), COUNT(*)
            FROM transactions
            WHERE user_id = ? AND kind = 'expense' AND date BETWEEN ? AND ?
            GROUP BY 1
            "#,
        )?;

        let rows: Vec<(u32, f64, i64)> = stmt
            .query_map(
                params![
                    user_id,
                    format!("{:04}-01-01", year),
                    format!("{:04}-12-31", year)
                ],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let result = MONTH_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let month = (i + 1) as u32;
                let data = rows.iter().find(|(m, _, _)| *m == month);
                MonthlyExpense {
                    month: label,
                    amount: data.map(|(_, amount, _)| *amount).unwrap_or(0.0),
                    count: data.map(|(_, _, count)| *count).unwrap_or(0),
                }
            })
            .collect();

        Ok(result)
    }

    /// All-time totals per category for one transaction type, emitted in
    /// registry order with zero rows for categories that have no data
    pub fn category_breakdown(
        &self,
        user_id: i64,
        kind: TransactionType,
    ) -> Result<Vec<CategoryBreakdownRow>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT category, SUM(amount), COUNT(*)
            FROM transactions
            WHERE user_id = ? AND kind = ?
            GROUP BY category
            "#,
        )?;

        let rows: Vec<(String, f64, i64)> = stmt
            .query_map(params![user_id, kind.as_str()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let registry: Vec<Category> = match kind {
            TransactionType::Expense => {
                ExpenseCategory::ALL.iter().map(|c| Category::Expense(*c)).collect()
            }
            TransactionType::Income => {
                IncomeCategory::ALL.iter().map(|c| Category::Income(*c)).collect()
            }
        };

        let result = registry
            .into_iter()
            .map(|category| {
                let data = rows.iter().find(|(label, _, _)| label == category.as_str());
                CategoryBreakdownRow {
                    category,
                    amount: data.map(|(_, amount, _)| *amount).unwrap_or(0.0),
                    count: data.map(|(_, _, count)| *count).unwrap_or(0),
                }
            })
            .collect();

        Ok(result)
    }

    /// Count all transactions (for the status command)
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }
}

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(4)?;
    let date = date_str
        .parse::<NaiveDate>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, e.into()))?;

    let kind_str: String = row.get(5)?;
    let kind = kind_str
        .parse::<TransactionType>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, e.into()))?;

    let label: String = row.get(6)?;
    let category = Category::parse(kind, &label).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, Type::Text, e.to_string().into())
    })?;

    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        amount: row.get(2)?,
        description: row.get(3)?,
        date,
        kind,
        category,
        created_at: parse_datetime(&row.get::<_, String>(7)?),
        updated_at: parse_datetime(&row.get::<_, String>(8)?),
    })
}
