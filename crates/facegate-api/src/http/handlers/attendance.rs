//! Attendance check-in handler: recognize a face, then record the event.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::json;

use facegate_infra::media::decode_image_payload;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for the attendance endpoint.
#[derive(Debug, Deserialize)]
pub struct AttendanceRequest {
    /// Base64 image, optionally as a `data:` URL.
    pub image: String,
}

/// POST /api/v1/attendance - Identify the face and record attendance.
pub async fn record_attendance(
    State(state): State<AppState>,
    Json(body): Json<AttendanceRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let image = decode_image_payload(&body.image)?;
    let recognized = state.recognition.identify(&image).await?;
    let record = state
        .attendance
        .record(&recognized.nip, Some(recognized.score))
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let data = json!({
        "nip": recognized.nip,
        "name": recognized.name,
        "score": recognized.score,
        "status": record.status,
        "recorded_at": record.recorded_at.to_rfc3339(),
    });

    let resp = ApiResponse::success(data, request_id, elapsed)
        .with_link("self", "/api/v1/attendance")
        .with_link("report", "/api/v1/reports/attendance");

    Ok(Json(resp))
}
