//! Application error type mapping to the envelope format.
//!
//! Each error becomes an `ApiResponse::error` with a machine-readable
//! code; the HTTP status is derived from that code in one place
//! (`ApiResponse::into_response`).

use axum::response::{IntoResponse, Response};

use facegate_types::error::{
    AuthError, EmployeeError, RecognitionError, RepositoryError, ReportError,
};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Face recognition pipeline errors.
    Recognition(RecognitionError),
    /// Login failures.
    Auth(AuthError),
    /// Employee directory errors.
    Employee(EmployeeError),
    /// Report generation errors.
    Report(ReportError),
    /// Validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<RecognitionError> for AppError {
    fn from(e: RecognitionError) -> Self {
        AppError::Recognition(e)
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<EmployeeError> for AppError {
    fn from(e: EmployeeError) -> Self {
        AppError::Employee(e)
    }
}

impl From<ReportError> for AppError {
    fn from(e: ReportError) -> Self {
        AppError::Report(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => AppError::Employee(EmployeeError::NotFound),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl AppError {
    fn code_and_message(&self) -> (&'static str, String) {
        match self {
            AppError::Recognition(RecognitionError::InvalidImage(msg)) => {
                ("INVALID_IMAGE", format!("Invalid image payload: {msg}"))
            }
            AppError::Recognition(RecognitionError::NoFaceDetected) => (
                "NO_FACE_DETECTED",
                "No face detected in the image".to_string(),
            ),
            AppError::Recognition(RecognitionError::MultipleFacesDetected(n)) => (
                "MULTIPLE_FACES",
                format!("Expected exactly one face, found {n}"),
            ),
            AppError::Recognition(RecognitionError::NoCandidates) => (
                "NO_ENROLLED_FACES",
                "No enrolled faces to match against".to_string(),
            ),
            AppError::Recognition(RecognitionError::NoMatch { best_score }) => {
                let message = match best_score {
                    Some(score) => format!("Face not recognized (best score {score:.4})"),
                    None => "Face not recognized".to_string(),
                };
                ("NOT_RECOGNIZED", message)
            }
            AppError::Recognition(RecognitionError::EncoderUnavailable(msg)) => (
                "ENCODER_UNAVAILABLE",
                format!("Face encoder unavailable: {msg}"),
            ),
            AppError::Recognition(RecognitionError::DimensionMismatch { expected, actual }) => (
                "EMBEDDING_MISMATCH",
                format!("Embedding dimension mismatch: expected {expected}, got {actual}"),
            ),
            AppError::Recognition(RecognitionError::StoreUnavailable(msg)) => {
                ("STORE_UNAVAILABLE", format!("Face store unavailable: {msg}"))
            }
            AppError::Auth(AuthError::InvalidCredentials) => {
                ("UNAUTHORIZED", "Invalid email or password".to_string())
            }
            AppError::Auth(AuthError::Store(msg)) => (
                "STORE_UNAVAILABLE",
                format!("Credential store unavailable: {msg}"),
            ),
            AppError::Auth(e) => ("AUTH_ERROR", e.to_string()),
            AppError::Employee(EmployeeError::NotFound) => {
                ("NOT_FOUND", "Employee not found".to_string())
            }
            AppError::Employee(EmployeeError::NipConflict(nip)) => (
                "NIP_CONFLICT",
                format!("Employee with NIP '{nip}' already exists"),
            ),
            AppError::Employee(EmployeeError::Validation(msg)) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Employee(e) => ("EMPLOYEE_ERROR", e.to_string()),
            AppError::Report(ReportError::InvalidPeriod(msg)) => {
                ("VALIDATION_ERROR", format!("Invalid report period: {msg}"))
            }
            AppError::Report(e) => ("REPORT_ERROR", e.to_string()),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = self.code_and_message();
        ApiResponse::error(code, &message).into_response()
    }
}
