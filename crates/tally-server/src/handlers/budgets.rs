//! Budget handlers: upsert, listing, comparison, and insights

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use crate::{resolve_user, AppError, AppState, SuccessResponse};
use tally_core::categories::ExpenseCategory;
use tally_core::models::{Budget, ComparisonRow, SpendingInsights};
use tally_core::period::Period;
use tally_core::reports::{ComparisonEngine, InsightsEngine};

/// Request body for the budget upsert
#[derive(Debug, Deserialize)]
pub struct UpsertBudgetRequest {
    pub category: String,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

/// Query parameters naming one period. Both fields are required; their
/// absence is a client error.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl PeriodQuery {
    fn period(&self) -> Result<Period, AppError> {
        let month = self
            .month
            .ok_or_else(|| AppError::bad_request("Month and year are required"))?;
        let year = self
            .year
            .ok_or_else(|| AppError::bad_request("Month and year are required"))?;
        Ok(Period::new(month, year)?)
    }
}

/// POST /api/budgets - Create or replace the budget for (category, month, year)
pub async fn upsert_budget(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<UpsertBudgetRequest>,
) -> Result<Json<Budget>, AppError> {
    let user = resolve_user(&state, &headers)?;

    let category = body
        .category
        .parse::<ExpenseCategory>()
        .map_err(|_| AppError::bad_request("Invalid category"))?;
    let period = Period::new(body.month, body.year)?;

    let budget = state
        .db
        .upsert_budget(user.id, category, body.amount, period)?;
    Ok(Json(budget))
}

/// GET /api/budgets - List budgets for one period
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<Vec<Budget>>, AppError> {
    let user = resolve_user(&state, &headers)?;
    let period = params.period()?;
    let budgets = state.db.list_budgets(user.id, period)?;
    Ok(Json(budgets))
}

/// DELETE /api/budgets/:id - Delete a budget
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = resolve_user(&state, &headers)?;
    state.db.delete_budget(user.id, id)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/budgets/comparison - Budget vs actual for every expense category
pub async fn get_budget_comparison(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<Vec<ComparisonRow>>, AppError> {
    let user = resolve_user(&state, &headers)?;
    let period = params.period()?;

    let engine = ComparisonEngine::new(&state.db, &state.db);
    let rows = engine.compare(user.id, period)?;
    Ok(Json(rows))
}

/// GET /api/budgets/insights - Month-over-month spending insights
pub async fn get_spending_insights(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<SpendingInsights>, AppError> {
    let user = resolve_user(&state, &headers)?;
    let period = params.period()?;

    let engine = InsightsEngine::new(&state.db);
    let insights = engine.insights(user.id, period)?;
    Ok(Json(insights))
}
