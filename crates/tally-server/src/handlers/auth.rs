//! Authentication-related handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::Serialize;

use crate::{get_user_email, AppError, AppState};

/// Response for the /api/me endpoint
#[derive(Serialize)]
pub struct MeResponse {
    /// The authenticated user's email or identifier
    pub user: String,
    /// How the user was authenticated
    pub auth_method: String,
}

/// Get the currently authenticated user
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, AppError> {
    let email = get_user_email(&headers);

    let auth_method = if email == "api-key" {
        "api_key"
    } else if email == "local-dev" {
        "none"
    } else {
        "header"
    };

    // Make sure the user row exists so first contact shows up in the database
    let user = state.db.get_or_create_user(&email)?;

    Ok(Json(MeResponse {
        user: user.email,
        auth_method: auth_method.to_string(),
    }))
}
