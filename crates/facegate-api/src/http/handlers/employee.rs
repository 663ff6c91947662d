//! Employee directory CRUD handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde_json::json;

use facegate_types::employee::{EmployeeId, NewEmployee, UpdateEmployee};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/employees - Create a new employee.
pub async fn create_employee(
    State(state): State<AppState>,
    Json(body): Json<NewEmployee>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let employee = state.employees.create(body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let data = serde_json::to_value(&employee)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::success(data, request_id, elapsed)
        .with_link("self", &format!("/api/v1/employees/{}", employee.id))
        .with_link("enroll", "/api/v1/faces/enroll");

    Ok(Json(resp))
}

/// GET /api/v1/employees - List all employees.
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let employees = state.employees.list().await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let data = employees
        .iter()
        .map(|e| serde_json::to_value(e).unwrap_or_else(|_| json!(null)))
        .collect();

    let resp = ApiResponse::success(data, request_id, elapsed)
        .with_link("self", "/api/v1/employees");

    Ok(Json(resp))
}

/// PUT /api/v1/employees/:id - Partial profile update.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateEmployee>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let id: EmployeeId = id
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid employee id '{id}'")))?;
    let employee = state.employees.update(&id, body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let data = serde_json::to_value(&employee)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::success(data, request_id, elapsed)
        .with_link("self", &format!("/api/v1/employees/{}", employee.id));

    Ok(Json(resp))
}
