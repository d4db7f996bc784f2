//! Month-over-month spending insights engine

use super::{percent_change, ExpenseTotals};
use crate::error::Result;
use crate::models::{CategoryComparison, SpendingInsights, TopCategory};
use crate::period::Period;

/// Computes spending deltas between a period and the calendar month
/// immediately preceding it
pub struct InsightsEngine<'a, T> {
    transactions: &'a T,
}

impl<'a, T: ExpenseTotals> InsightsEngine<'a, T> {
    pub fn new(transactions: &'a T) -> Self {
        Self { transactions }
    }

    pub fn insights(&self, user_id: i64, period: Period) -> Result<SpendingInsights> {
        let (from, to) = period.date_range();
        let current = self.transactions.expense_totals(user_id, from, to)?;

        let (prev_from, prev_to) = period.prev().date_range();
        let previous = self.transactions.expense_totals(user_id, prev_from, prev_to)?;

        let total_spending: f64 = current.iter().map(|a| a.total).sum();
        let previous_month_spending: f64 = previous.iter().map(|a| a.total).sum();

        // Aggregates arrive sorted by total descending, so the top categories
        // are simply the first three
        let top_categories = current
            .iter()
            .take(3)
            .map(|a| TopCategory {
                category: a.category,
                amount: a.total,
                transaction_count: a.count,
                avg_transaction: a.average,
            })
            .collect();

        // Only categories with current-month spend get a comparison row;
        // categories that went quiet this month drop out entirely
        let category_comparisons = current
            .iter()
            .map(|a| {
                let previous_amount = previous
                    .iter()
                    .find(|p| p.category == a.category)
                    .map(|p| p.total)
                    .unwrap_or(0.0);
                CategoryComparison {
                    category: a.category,
                    current_amount: a.total,
                    previous_amount,
                    change: percent_change(a.total, previous_amount),
                    transaction_count: a.count,
                    avg_transaction: a.average,
                }
            })
            .collect();

        Ok(SpendingInsights {
            total_spending,
            previous_month_spending,
            month_over_month_change: percent_change(total_spending, previous_month_spending),
            top_categories,
            category_comparisons,
        })
    }
}
