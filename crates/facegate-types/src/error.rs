use thiserror::Error;

/// Errors from the face recognition request path.
///
/// All variants are recoverable at the request level; none is process-fatal.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("invalid image data: {0}")]
    InvalidImage(String),

    #[error("no face detected")]
    NoFaceDetected,

    #[error("multiple faces detected ({0})")]
    MultipleFacesDetected(usize),

    #[error("face encoder unavailable: {0}")]
    EncoderUnavailable(String),

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("no enrolled faces to match against")]
    NoCandidates,

    #[error("face not recognized")]
    NoMatch {
        /// Best score seen during the scan, absent when every stored row
        /// was corrupt.
        best_score: Option<f32>,
    },

    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Errors from repository operations (used by trait definitions in facegate-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the credential login flow.
///
/// `InvalidCredentials` deliberately covers unknown email, missing hash, and
/// wrong password alike so the response does not leak which one failed.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("password hashing error: {0}")]
    Hash(String),

    #[error("record store unavailable: {0}")]
    Store(String),
}

/// Errors from employee profile management.
#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("employee not found")]
    NotFound,

    #[error("nip '{0}' already exists")]
    NipConflict(String),

    #[error("invalid employee data: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from attendance recap assembly.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid report period: {0}")]
    InvalidPeriod(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ReportError {
    fn from(e: RepositoryError) -> Self {
        ReportError::Storage(e.to_string())
    }
}

impl From<RepositoryError> for EmployeeError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => EmployeeError::NotFound,
            RepositoryError::Conflict(msg) => EmployeeError::NipConflict(msg),
            other => EmployeeError::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognition_error_display() {
        let err = RecognitionError::MultipleFacesDetected(3);
        assert_eq!(err.to_string(), "multiple faces detected (3)");
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = RecognitionError::DimensionMismatch {
            expected: 512,
            actual: 128,
        };
        assert!(err.to_string().contains("512"));
        assert!(err.to_string().contains("128"));
    }

    #[test]
    fn test_repository_error_maps_to_employee_error() {
        let err: EmployeeError = RepositoryError::NotFound.into();
        assert!(matches!(err, EmployeeError::NotFound));
    }
}
