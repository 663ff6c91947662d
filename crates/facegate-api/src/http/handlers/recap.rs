//! Monthly attendance report handler.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::report::recap_to_csv;
use crate::state::AppState;

/// Query parameters for the report endpoint.
#[derive(Debug, Deserialize)]
pub struct RecapQuery {
    pub month: u32,
    pub year: i32,
    /// Restrict the report to one employee.
    #[serde(default)]
    pub nip: Option<String>,
    /// `json` (default) or `csv`.
    #[serde(default)]
    pub format: Option<String>,
}

/// GET /api/v1/reports/attendance?month=&year=[&nip=][&format=csv]
///
/// JSON by default; `format=csv` streams a CSV download instead of the
/// envelope. `nip` narrows the report to one employee (404 if unknown).
pub async fn attendance_report(
    State(state): State<AppState>,
    Query(query): Query<RecapQuery>,
) -> Result<Response, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let rows = match query.nip.as_deref() {
        Some(nip) => {
            let employee = state.employees.get_by_nip(nip).await?;
            state
                .attendance
                .employee_recap(&employee, query.year, query.month)
                .await?
        }
        None => {
            let employees = state.employees.list().await?;
            state
                .attendance
                .monthly_recap(&employees, query.year, query.month)
                .await?
        }
    };
    let elapsed = start.elapsed().as_millis() as u64;

    if query.format.as_deref() == Some("csv") {
        let csv = recap_to_csv(&rows);
        let filename = format!(
            "attendance-{}-{:02}.csv",
            query.year, query.month
        );
        return Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            csv,
        )
            .into_response());
    }

    let data = json!({
        "year": query.year,
        "month": query.month,
        "rows": rows,
    });

    let resp = ApiResponse::success(data, request_id, elapsed)
        .with_link("self", "/api/v1/reports/attendance");

    Ok(resp.into_response())
}
