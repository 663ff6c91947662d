//! Employee profile management: create, list, update, face enrollment
//! persistence.

use chrono::Utc;

use facegate_types::embedding::Embedding;
use facegate_types::employee::{Employee, EmployeeId, NewEmployee, UpdateEmployee};
use facegate_types::error::EmployeeError;

use crate::repository::employee::EmployeeRepository;
use crate::service::hash::PasswordHasher;

pub struct EmployeeService<R, H> {
    repo: R,
    hasher: H,
}

impl<R, H> EmployeeService<R, H>
where
    R: EmployeeRepository,
    H: PasswordHasher,
{
    pub fn new(repo: R, hasher: H) -> Self {
        Self { repo, hasher }
    }

    pub async fn create(&self, input: NewEmployee) -> Result<Employee, EmployeeError> {
        let nip = required(&input.nip, "nip")?;
        let name = required(&input.name, "name")?;
        let email = input
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(String::from);

        let password_hash = match input.password.as_deref() {
            Some(password) => Some(
                self.hasher
                    .hash(password)
                    .map_err(|e| EmployeeError::Storage(e.to_string()))?,
            ),
            None => None,
        };

        let now = Utc::now();
        let employee = Employee {
            id: EmployeeId::new(),
            nip,
            name,
            email,
            face_enrolled: false,
            has_password: password_hash.is_some(),
            created_at: now,
            updated_at: now,
        };

        self.repo.create(&employee, password_hash.as_deref()).await?;
        Ok(employee)
    }

    pub async fn list(&self) -> Result<Vec<Employee>, EmployeeError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get_by_nip(&self, nip: &str) -> Result<Employee, EmployeeError> {
        self.repo
            .find_by_nip(nip)
            .await?
            .ok_or(EmployeeError::NotFound)
    }

    /// Partial profile update. Name and nip must be non-empty when
    /// supplied; a supplied password is re-hashed before storage.
    pub async fn update(
        &self,
        id: &EmployeeId,
        input: UpdateEmployee,
    ) -> Result<Employee, EmployeeError> {
        let nip = match input.nip.as_deref() {
            Some(v) => Some(required(v, "nip")?),
            None => None,
        };
        let name = match input.name.as_deref() {
            Some(v) => Some(required(v, "name")?),
            None => None,
        };
        let email = input
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(String::from);

        let password_hash = match input.password.as_deref() {
            Some(password) => Some(
                self.hasher
                    .hash(password)
                    .map_err(|e| EmployeeError::Storage(e.to_string()))?,
            ),
            None => None,
        };

        let employee = self
            .repo
            .update(
                id,
                nip.as_deref(),
                name.as_deref(),
                email.as_deref(),
                password_hash.as_deref(),
            )
            .await?;
        Ok(employee)
    }

    /// Persist an enrollment embedding, replacing any previous one.
    pub async fn enroll_face(
        &self,
        nip: &str,
        embedding: &Embedding,
    ) -> Result<(), EmployeeError> {
        if self.repo.find_by_nip(nip).await?.is_none() {
            return Err(EmployeeError::NotFound);
        }
        self.repo.store_embedding(nip, embedding).await?;
        tracing::info!(%nip, dim = embedding.dimension(), "face embedding stored");
        Ok(())
    }
}

fn required(value: &str, field: &str) -> Result<String, EmployeeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EmployeeError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
