use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for an employee, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub Uuid);

impl EmployeeId {
    /// Create a new EmployeeId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// An employee registered in the attendance system.
///
/// The stored face embedding and password hash never leave the repository
/// layer through this struct; API responses expose only the flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    /// Business identifier (employee number). Unique.
    pub nip: String,
    /// Display name.
    pub name: String,
    /// Login email, unique when present.
    pub email: Option<String>,
    /// Whether a face embedding is enrolled.
    pub face_enrolled: bool,
    /// Whether a login password is set.
    pub has_password: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an employee.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
    pub nip: String,
    pub name: String,
    pub email: Option<String>,
    /// Plaintext; hashed before it reaches the repository.
    pub password: Option<String>,
}

/// Partial update of an employee profile.
///
/// `None` fields are left untouched. A `Some` password is re-hashed and
/// replaces the stored hash.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployee {
    pub nip: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// One row fetched for the match scan: identity plus the raw textual
/// embedding encoding exactly as stored. Parsing happens at ingestion so a
/// corrupt row can be skipped instead of failing the fetch.
#[derive(Debug, Clone)]
pub struct FaceRecord {
    pub nip: String,
    pub name: String,
    pub raw_embedding: String,
}

/// Stored login credentials for an employee, fetched by email.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub name: String,
    pub password_hash: Option<String>,
}
