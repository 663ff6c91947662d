//! Credential login handler.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::json;

use facegate_core::service::auth::LoginOutcome;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/auth/login - Verify email + password.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let outcome = state.auth.login(&body.email, &body.password).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let data = match outcome {
        LoginOutcome::Admin => json!({ "role": "admin", "name": "Administrator" }),
        LoginOutcome::Employee { name } => json!({ "role": "employee", "name": name }),
    };

    let resp = ApiResponse::success(data, request_id, elapsed).with_link("self", "/api/v1/auth/login");

    Ok(Json(resp))
}
