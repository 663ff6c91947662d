//! Attendance repository trait definition.

use chrono::{DateTime, Utc};
use facegate_types::attendance::AttendanceRecord;
use facegate_types::error::RepositoryError;

/// Trait for the attendance event store. Append-mostly: one row per event,
/// no cross-request ordering guarantee beyond the store's single-row
/// atomicity.
pub trait AttendanceRepository: Send + Sync {
    fn insert(
        &self,
        record: &AttendanceRecord,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All events with `start <= recorded_at < end`, ordered by time.
    fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Vec<AttendanceRecord>, RepositoryError>> + Send;

    /// Events for one employee on the same range, ordered by time.
    fn list_for_employee(
        &self,
        nip: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Vec<AttendanceRecord>, RepositoryError>> + Send;

    fn count(&self) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;
}
