//! SQLite employee repository implementation.
//!
//! Implements `EmployeeRepository` from `facegate-core` using sqlx with
//! split read/write pools. Face embeddings are stored as the textual
//! encoding produced at enrollment; password hashes never leave this layer
//! except through `find_credentials`.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use facegate_core::repository::employee::EmployeeRepository;
use facegate_types::embedding::Embedding;
use facegate_types::employee::{Credentials, Employee, EmployeeId, FaceRecord};
use facegate_types::error::RepositoryError;

use super::pool::DatabasePool;

pub struct SqliteEmployeeRepository {
    pool: DatabasePool,
}

impl SqliteEmployeeRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn query_err(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict(db.message().to_string())
        }
        _ => RepositoryError::Query(e.to_string()),
    }
}

fn employee_from_row(row: &SqliteRow) -> Result<Employee, RepositoryError> {
    let id_str: String = row.try_get("id").map_err(query_err)?;
    let id = id_str
        .parse::<EmployeeId>()
        .map_err(|e| RepositoryError::Query(format!("invalid employee id: {e}")))?;
    let created_at_str: String = row.try_get("created_at").map_err(query_err)?;
    let updated_at_str: String = row.try_get("updated_at").map_err(query_err)?;
    let face_embedding: Option<String> = row.try_get("face_embedding").map_err(query_err)?;
    let password_hash: Option<String> = row.try_get("password_hash").map_err(query_err)?;

    Ok(Employee {
        id,
        nip: row.try_get("nip").map_err(query_err)?,
        name: row.try_get("name").map_err(query_err)?,
        email: row.try_get("email").map_err(query_err)?,
        face_enrolled: face_embedding.is_some(),
        has_password: password_hash.is_some(),
        created_at: parse_datetime(&created_at_str)?,
        updated_at: parse_datetime(&updated_at_str)?,
    })
}

impl EmployeeRepository for SqliteEmployeeRepository {
    async fn list_with_embeddings(&self) -> Result<Vec<FaceRecord>, RepositoryError> {
        // Ordered by id (uuid v7, insertion order) so tie-breaks in the
        // match scan stay deterministic across requests.
        let rows = sqlx::query(
            "SELECT nip, name, face_embedding FROM employees
             WHERE face_embedding IS NOT NULL ORDER BY id",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(FaceRecord {
                nip: row.try_get("nip").map_err(query_err)?,
                name: row.try_get("name").map_err(query_err)?,
                raw_embedding: row.try_get("face_embedding").map_err(query_err)?,
            });
        }
        Ok(records)
    }

    async fn store_embedding(
        &self,
        nip: &str,
        embedding: &Embedding,
    ) -> Result<(), RepositoryError> {
        let now = format_datetime(&Utc::now());
        let result = sqlx::query(
            "UPDATE employees SET face_embedding = ?, updated_at = ? WHERE nip = ?",
        )
        .bind(embedding.to_text())
        .bind(&now)
        .bind(nip)
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn create(
        &self,
        employee: &Employee,
        password_hash: Option<&str>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO employees (id, nip, name, email, password_hash, face_embedding, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, NULL, ?, ?)",
        )
        .bind(employee.id.to_string())
        .bind(&employee.nip)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(password_hash)
        .bind(format_datetime(&employee.created_at))
        .bind(format_datetime(&employee.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, nip, name, email, password_hash, face_embedding, created_at, updated_at
             FROM employees ORDER BY id",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        rows.iter().map(employee_from_row).collect()
    }

    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, nip, name, email, password_hash, face_embedding, created_at, updated_at
             FROM employees WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_err)?;

        row.as_ref().map(employee_from_row).transpose()
    }

    async fn find_by_nip(&self, nip: &str) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, nip, name, email, password_hash, face_embedding, created_at, updated_at
             FROM employees WHERE nip = ?",
        )
        .bind(nip)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_err)?;

        row.as_ref().map(employee_from_row).transpose()
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<Credentials>, RepositoryError> {
        let row = sqlx::query("SELECT name, password_hash FROM employees WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        match row {
            Some(row) => Ok(Some(Credentials {
                name: row.try_get("name").map_err(query_err)?,
                password_hash: row.try_get("password_hash").map_err(query_err)?,
            })),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        id: &EmployeeId,
        nip: Option<&str>,
        name: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<Employee, RepositoryError> {
        let now = format_datetime(&Utc::now());
        let result = sqlx::query(
            "UPDATE employees SET
                 nip = COALESCE(?, nip),
                 name = COALESCE(?, name),
                 email = COALESCE(?, email),
                 password_hash = COALESCE(?, password_hash),
                 updated_at = ?
             WHERE id = ?",
        )
        .bind(nip)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(&now)
        .bind(id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.find_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_employee(nip: &str, name: &str, email: Option<&str>) -> Employee {
        let now = Utc::now();
        Employee {
            id: EmployeeId::new(),
            nip: nip.to_string(),
            name: name.to_string(),
            email: email.map(String::from),
            face_enrolled: false,
            has_password: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_nip() {
        let repo = SqliteEmployeeRepository::new(test_pool().await);
        let employee = make_employee("100", "Ana", Some("ana@example.com"));
        repo.create(&employee, Some("$argon2id$fake")).await.unwrap();

        let found = repo.find_by_nip("100").await.unwrap().unwrap();
        assert_eq!(found.id, employee.id);
        assert_eq!(found.name, "Ana");
        assert!(found.has_password);
        assert!(!found.face_enrolled);
    }

    #[tokio::test]
    async fn test_duplicate_nip_is_conflict() {
        let repo = SqliteEmployeeRepository::new(test_pool().await);
        repo.create(&make_employee("100", "Ana", None), None)
            .await
            .unwrap();
        let err = repo
            .create(&make_employee("100", "Budi", None), None)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_store_embedding_roundtrip() {
        let repo = SqliteEmployeeRepository::new(test_pool().await);
        repo.create(&make_employee("100", "Ana", None), None)
            .await
            .unwrap();

        let embedding = Embedding::new(vec![0.25, -0.5, 1.0]).unwrap();
        repo.store_embedding("100", &embedding).await.unwrap();

        let records = repo.list_with_embeddings().await.unwrap();
        assert_eq!(records.len(), 1);
        let parsed = Embedding::parse_text(&records[0].raw_embedding).unwrap();
        assert_eq!(parsed, embedding);

        let found = repo.find_by_nip("100").await.unwrap().unwrap();
        assert!(found.face_enrolled);
    }

    #[tokio::test]
    async fn test_store_embedding_replaces() {
        let repo = SqliteEmployeeRepository::new(test_pool().await);
        repo.create(&make_employee("100", "Ana", None), None)
            .await
            .unwrap();

        let first = Embedding::new(vec![1.0, 0.0]).unwrap();
        let second = Embedding::new(vec![0.0, 1.0]).unwrap();
        repo.store_embedding("100", &first).await.unwrap();
        repo.store_embedding("100", &second).await.unwrap();

        let records = repo.list_with_embeddings().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            Embedding::parse_text(&records[0].raw_embedding).unwrap(),
            second
        );
    }

    #[tokio::test]
    async fn test_store_embedding_unknown_nip() {
        let repo = SqliteEmployeeRepository::new(test_pool().await);
        let embedding = Embedding::new(vec![1.0]).unwrap();
        let err = repo.store_embedding("999", &embedding).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_with_embeddings_insertion_order() {
        let repo = SqliteEmployeeRepository::new(test_pool().await);
        for (nip, name) in [("1", "A"), ("2", "B"), ("3", "C")] {
            repo.create(&make_employee(nip, name, None), None)
                .await
                .unwrap();
            repo.store_embedding(nip, &Embedding::new(vec![1.0]).unwrap())
                .await
                .unwrap();
        }
        let records = repo.list_with_embeddings().await.unwrap();
        let nips: Vec<&str> = records.iter().map(|r| r.nip.as_str()).collect();
        assert_eq!(nips, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_find_credentials() {
        let repo = SqliteEmployeeRepository::new(test_pool().await);
        repo.create(
            &make_employee("100", "Ana", Some("ana@example.com")),
            Some("$argon2id$fake"),
        )
        .await
        .unwrap();

        let credentials = repo
            .find_credentials("ana@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(credentials.name, "Ana");
        assert_eq!(credentials.password_hash.as_deref(), Some("$argon2id$fake"));

        assert!(
            repo.find_credentials("ghost@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let repo = SqliteEmployeeRepository::new(test_pool().await);
        let employee = make_employee("100", "Ana", None);
        repo.create(&employee, None).await.unwrap();

        let updated = repo
            .update(&employee.id, None, Some("Ana Maria"), None, Some("$h"))
            .await
            .unwrap();
        assert_eq!(updated.nip, "100");
        assert_eq!(updated.name, "Ana Maria");
        assert!(updated.has_password);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = SqliteEmployeeRepository::new(test_pool().await);
        let err = repo
            .update(&EmployeeId::new(), None, Some("X"), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
