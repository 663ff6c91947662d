use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for an attendance record (UUID v7).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttendanceId(pub Uuid);

impl AttendanceId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AttendanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttendanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome classification of an attendance event against the work schedule.
///
/// - OnTime: clocked in at or before the clock-in deadline
/// - Late: clocked in after the deadline but before the clock-out boundary
/// - ClockOut: recorded after the clock-out boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    OnTime,
    Late,
    ClockOut,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::OnTime => write!(f, "on-time"),
            AttendanceStatus::Late => write!(f, "late"),
            AttendanceStatus::ClockOut => write!(f, "clock-out"),
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-time" => Ok(AttendanceStatus::OnTime),
            "late" => Ok(AttendanceStatus::Late),
            "clock-out" => Ok(AttendanceStatus::ClockOut),
            other => Err(format!("invalid attendance status: '{other}'")),
        }
    }
}

/// One attendance event for an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub employee_nip: String,
    pub recorded_at: DateTime<Utc>,
    pub status: AttendanceStatus,
    /// Match score from the recognition that produced this event, when the
    /// event came through the face endpoint.
    pub score: Option<f32>,
}

/// One cell of the monthly recap: an employee on a calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct RecapRow {
    pub date: NaiveDate,
    pub nip: String,
    pub name: String,
    /// Local wall-clock "HH:MM" of the first clock-in, if any.
    pub clock_in: Option<String>,
    /// Local wall-clock "HH:MM" of the last clock-out, if any.
    pub clock_out: Option<String>,
    /// Set on days outside the configured workweek.
    pub note: Option<String>,
}
