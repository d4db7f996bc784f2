//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;

use crate::{resolve_user, AppError, AppState, SuccessResponse};
use tally_core::categories::{ExpenseCategory, IncomeCategory, TransactionType};
use tally_core::models::{
    CategoryBreakdownRow, MonthlyExpense, NewTransaction, Transaction, TransactionUpdate,
};

/// Request body for creating a transaction
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: f64,
    pub description: String,
    /// Defaults to today when omitted
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
}

/// GET /api/transactions - List the user's transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let user = resolve_user(&state, &headers)?;
    let transactions = state.db.list_transactions(user.id)?;
    Ok(Json(transactions))
}

/// POST /api/transactions - Create a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let user = resolve_user(&state, &headers)?;

    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());
    let new_tx = NewTransaction::new(body.amount, &body.description, date, body.kind, &body.category)?;

    let tx = state.db.insert_transaction(user.id, &new_tx)?;
    Ok((StatusCode::CREATED, Json(tx)))
}

/// GET /api/transactions/categories - Both category registries
pub async fn get_categories() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "expense": ExpenseCategory::ALL,
        "income": IncomeCategory::ALL,
    }))
}

/// GET /api/transactions/:id - Fetch one transaction
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, AppError> {
    let user = resolve_user(&state, &headers)?;
    let tx = state
        .db
        .get_transaction(user.id, id)?
        .ok_or_else(|| AppError::not_found("Transaction not found"))?;
    Ok(Json(tx))
}

/// PUT /api/transactions/:id - Partially update a transaction
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(update): Json<TransactionUpdate>,
) -> Result<Json<Transaction>, AppError> {
    let user = resolve_user(&state, &headers)?;
    let tx = state.db.update_transaction(user.id, id, &update)?;
    Ok(Json(tx))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = resolve_user(&state, &headers)?;
    state.db.delete_transaction(user.id, id)?;
    Ok(Json(SuccessResponse { success: true }))
}

#[derive(Debug, Deserialize)]
pub struct MonthlyExpensesQuery {
    /// Defaults to the current year
    pub year: Option<i32>,
}

/// GET /api/transactions/monthly-expenses - Zero-filled yearly expense chart
pub async fn get_monthly_expenses(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<MonthlyExpensesQuery>,
) -> Result<Json<Vec<MonthlyExpense>>, AppError> {
    let user = resolve_user(&state, &headers)?;
    let year = params.year.unwrap_or_else(|| Utc::now().year());
    let months = state.db.monthly_expenses(user.id, year)?;
    Ok(Json(months))
}

#[derive(Debug, Deserialize)]
pub struct CategoryBreakdownQuery {
    /// Defaults to expense
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
}

/// GET /api/transactions/category-breakdown - Registry-ordered totals per category
pub async fn get_category_breakdown(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<CategoryBreakdownQuery>,
) -> Result<Json<Vec<CategoryBreakdownRow>>, AppError> {
    let user = resolve_user(&state, &headers)?;
    let kind = params.kind.unwrap_or(TransactionType::Expense);
    let breakdown = state.db.category_breakdown(user.id, kind)?;
    Ok(Json(breakdown))
}
