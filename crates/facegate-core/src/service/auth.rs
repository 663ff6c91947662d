//! Credential login, unrelated to the face-matching core.
//!
//! Two paths: the configured admin credential, then employee credentials
//! against a stored salted adaptive hash via the [`PasswordHasher`] port.
//! Every failure collapses to `InvalidCredentials` so responses never leak
//! whether an email exists or has a password set.

use secrecy::ExposeSecret;

use facegate_types::config::AdminConfig;
use facegate_types::error::AuthError;

use crate::repository::employee::EmployeeRepository;
use crate::service::hash::PasswordHasher;

/// Who logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Admin,
    Employee { name: String },
}

pub struct AuthService<R, H> {
    repo: R,
    hasher: H,
    admin: AdminConfig,
}

impl<R, H> AuthService<R, H>
where
    R: EmployeeRepository,
    H: PasswordHasher,
{
    pub fn new(repo: R, hasher: H, admin: AdminConfig) -> Self {
        Self {
            repo,
            hasher,
            admin,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        if self.is_admin(email, password) {
            tracing::info!("admin login");
            return Ok(LoginOutcome::Admin);
        }

        let credentials = self
            .repo
            .find_credentials(email)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = credentials
            .password_hash
            .ok_or(AuthError::InvalidCredentials)?;

        // A malformed stored hash is a verification failure, not a 500.
        match self.hasher.verify(password, &hash) {
            Ok(true) => {
                tracing::info!("employee login");
                Ok(LoginOutcome::Employee {
                    name: credentials.name,
                })
            }
            Ok(false) | Err(_) => Err(AuthError::InvalidCredentials),
        }
    }

    fn is_admin(&self, email: &str, password: &str) -> bool {
        match (&self.admin.email, &self.admin.password) {
            (Some(admin_email), Some(admin_password)) => {
                admin_email == email && admin_password.expose_secret() == password
            }
            _ => false,
        }
    }
}
