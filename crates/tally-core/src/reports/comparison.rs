//! Budget-vs-actual comparison engine

use super::{BudgetSource, ExpenseTotals};
use crate::categories::ExpenseCategory;
use crate::error::Result;
use crate::models::{BudgetStatus, ComparisonRow};
use crate::period::Period;

/// Joins budget caps against actual aggregated spend for one period
pub struct ComparisonEngine<'a, B, T> {
    budgets: &'a B,
    transactions: &'a T,
}

impl<'a, B: BudgetSource, T: ExpenseTotals> ComparisonEngine<'a, B, T> {
    pub fn new(budgets: &'a B, transactions: &'a T) -> Self {
        Self {
            budgets,
            transactions,
        }
    }

    /// One row per expense category in registry order, regardless of whether
    /// the category has a budget or any spend.
    pub fn compare(&self, user_id: i64, period: Period) -> Result<Vec<ComparisonRow>> {
        let budgets = self.budgets.budgets(user_id, period)?;
        let (from, to) = period.date_range();
        let actuals = self.transactions.expense_totals(user_id, from, to)?;

        let rows = ExpenseCategory::ALL
            .iter()
            .map(|&category| {
                let budget_amount = budgets
                    .iter()
                    .find(|b| b.category == category)
                    .map(|b| b.amount)
                    .unwrap_or(0.0);
                let actual = actuals.iter().find(|a| a.category == category);
                let actual_amount = actual.map(|a| a.total).unwrap_or(0.0);
                let transaction_count = actual.map(|a| a.count).unwrap_or(0);

                build_row(category, budget_amount, actual_amount, transaction_count)
            })
            .collect();

        Ok(rows)
    }
}

fn build_row(
    category: ExpenseCategory,
    budget_amount: f64,
    actual_amount: f64,
    transaction_count: i64,
) -> ComparisonRow {
    // Spending exactly at the cap counts as under, not over
    let status = if budget_amount == 0.0 {
        BudgetStatus::NoBudget
    } else if actual_amount <= budget_amount {
        BudgetStatus::Under
    } else {
        BudgetStatus::Over
    };

    ComparisonRow {
        category,
        budget_amount,
        actual_amount,
        difference: budget_amount - actual_amount,
        percentage: if budget_amount > 0.0 {
            actual_amount / budget_amount * 100.0
        } else {
            0.0
        },
        transaction_count,
        status,
    }
}
