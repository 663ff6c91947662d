//! SQLite attendance repository implementation.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use facegate_core::repository::attendance::AttendanceRepository;
use facegate_types::attendance::{AttendanceId, AttendanceRecord, AttendanceStatus};
use facegate_types::error::RepositoryError;
use uuid::Uuid;

use super::pool::DatabasePool;

pub struct SqliteAttendanceRepository {
    pool: DatabasePool,
}

impl SqliteAttendanceRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn query_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

fn record_from_row(row: &SqliteRow) -> Result<AttendanceRecord, RepositoryError> {
    let id_str: String = row.try_get("id").map_err(query_err)?;
    let id = Uuid::parse_str(&id_str)
        .map(AttendanceId)
        .map_err(|e| RepositoryError::Query(format!("invalid attendance id: {e}")))?;
    let recorded_at_str: String = row.try_get("recorded_at").map_err(query_err)?;
    let recorded_at = DateTime::parse_from_rfc3339(&recorded_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))?;
    let status_str: String = row.try_get("status").map_err(query_err)?;
    let status = status_str
        .parse::<AttendanceStatus>()
        .map_err(RepositoryError::Query)?;

    Ok(AttendanceRecord {
        id,
        employee_nip: row.try_get("employee_nip").map_err(query_err)?,
        recorded_at,
        status,
        score: row.try_get("score").map_err(query_err)?,
    })
}

impl AttendanceRepository for SqliteAttendanceRepository {
    async fn insert(&self, record: &AttendanceRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO attendance_records (id, employee_nip, recorded_at, status, score)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(&record.employee_nip)
        .bind(record.recorded_at.to_rfc3339())
        .bind(record.status.to_string())
        .bind(record.score)
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(())
    }

    async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, employee_nip, recorded_at, status, score FROM attendance_records
             WHERE recorded_at >= ? AND recorded_at < ? ORDER BY recorded_at",
        )
        .bind(start.to_rfc3339())
        .bind(end.to_rfc3339())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        rows.iter().map(record_from_row).collect()
    }

    async fn list_for_employee(
        &self,
        nip: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, employee_nip, recorded_at, status, score FROM attendance_records
             WHERE employee_nip = ? AND recorded_at >= ? AND recorded_at < ?
             ORDER BY recorded_at",
        )
        .bind(nip)
        .bind(start.to_rfc3339())
        .bind(end.to_rfc3339())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        rows.iter().map(record_from_row).collect()
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM attendance_records")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(query_err)?;
        Ok(row.0)
    }
}
