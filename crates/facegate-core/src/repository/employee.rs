//! Employee repository trait definition.

use facegate_types::embedding::Embedding;
use facegate_types::employee::{Credentials, Employee, EmployeeId, FaceRecord};
use facegate_types::error::RepositoryError;

/// Trait for the employee record store.
///
/// The raw embedding encoding in [`FaceRecord`] is returned verbatim; the
/// recognition service parses it tolerantly so a single corrupt row never
/// aborts a scan.
pub trait EmployeeRepository: Send + Sync {
    /// Fetch all employees that have a stored face embedding, in stable
    /// insertion order. Scan order matters: match ties break first-seen.
    fn list_with_embeddings(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<FaceRecord>, RepositoryError>> + Send;

    /// Replace (not merge) the stored embedding for an employee, by nip.
    fn store_embedding(
        &self,
        nip: &str,
        embedding: &Embedding,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn create(
        &self,
        employee: &Employee,
        password_hash: Option<&str>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Employee>, RepositoryError>> + Send;

    fn find_by_id(
        &self,
        id: &EmployeeId,
    ) -> impl std::future::Future<Output = Result<Option<Employee>, RepositoryError>> + Send;

    fn find_by_nip(
        &self,
        nip: &str,
    ) -> impl std::future::Future<Output = Result<Option<Employee>, RepositoryError>> + Send;

    /// Fetch login credentials by email. `None` when no such employee.
    fn find_credentials(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<Credentials>, RepositoryError>> + Send;

    /// Apply a profile update. `password_hash` replaces the stored hash
    /// when `Some`.
    fn update(
        &self,
        id: &EmployeeId,
        nip: Option<&str>,
        name: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Employee, RepositoryError>> + Send;
}
