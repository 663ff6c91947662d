//! Face enrollment handler.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::json;

use facegate_core::encoder::FaceEncoder;
use facegate_infra::media::decode_image_payload;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for face enrollment.
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    /// Employee NIP to attach the embedding to.
    pub nip: String,
    /// Base64 image, optionally as a `data:` URL.
    pub image: String,
}

/// POST /api/v1/faces/enroll - Extract a single face and store its embedding.
///
/// Rejects images with zero or more than one face. Re-enrolling replaces
/// the previous embedding.
pub async fn enroll_face(
    State(state): State<AppState>,
    Json(body): Json<EnrollRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let image = decode_image_payload(&body.image)?;
    let face = state.recognition.extract_single(&image).await?;
    state
        .employees
        .enroll_face(&body.nip, &face.embedding)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let data = json!({
        "nip": body.nip,
        "model": state.recognition.encoder().model_name(),
        "dimension": face.embedding.dimension(),
        "embedding": face.embedding,
    });

    let resp = ApiResponse::success(data, request_id, elapsed)
        .with_link("self", "/api/v1/faces/enroll")
        .with_link("employee", &format!("/api/v1/employees?nip={}", body.nip));

    Ok(Json(resp))
}
