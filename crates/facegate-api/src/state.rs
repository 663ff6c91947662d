//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST
//! API. Services are generic over encoder/repository/hasher traits, but
//! AppState pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use facegate_core::matching::MatchPolicy;
use facegate_core::service::attendance::AttendanceService;
use facegate_core::service::auth::AuthService;
use facegate_core::service::employee::EmployeeService;
use facegate_core::service::recognition::RecognitionService;
use facegate_infra::config::{database_url, load_config, resolve_data_dir};
use facegate_infra::crypto::password::Argon2PasswordHasher;
use facegate_infra::encoder::RemoteFaceEncoder;
use facegate_infra::sqlite::attendance::SqliteAttendanceRepository;
use facegate_infra::sqlite::employee::SqliteEmployeeRepository;
use facegate_infra::sqlite::pool::DatabasePool;
use facegate_types::config::ServiceConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteRecognitionService =
    RecognitionService<RemoteFaceEncoder, SqliteEmployeeRepository>;

pub type ConcreteAttendanceService = AttendanceService<SqliteAttendanceRepository>;

pub type ConcreteAuthService = AuthService<SqliteEmployeeRepository, Argon2PasswordHasher>;

pub type ConcreteEmployeeService = EmployeeService<SqliteEmployeeRepository, Argon2PasswordHasher>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub recognition: Arc<ConcreteRecognitionService>,
    pub attendance: Arc<ConcreteAttendanceService>,
    pub auth: Arc<ConcreteAuthService>,
    pub employees: Arc<ConcreteEmployeeService>,
    pub config: ServiceConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    ///
    /// The face encoder client is constructed exactly once here and
    /// injected into the recognition service.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        let encoder = RemoteFaceEncoder::new(&config.encoder);
        let policy = MatchPolicy::from_config(&config.matching);
        let recognition = RecognitionService::new(
            encoder,
            SqliteEmployeeRepository::new(db_pool.clone()),
            policy,
        );

        let attendance = AttendanceService::new(
            SqliteAttendanceRepository::new(db_pool.clone()),
            config.schedule.clone(),
        );

        let auth = AuthService::new(
            SqliteEmployeeRepository::new(db_pool.clone()),
            Argon2PasswordHasher::new(),
            config.admin.clone(),
        );

        let employees = EmployeeService::new(
            SqliteEmployeeRepository::new(db_pool.clone()),
            Argon2PasswordHasher::new(),
        );

        Ok(Self {
            recognition: Arc::new(recognition),
            attendance: Arc::new(attendance),
            auth: Arc::new(auth),
            employees: Arc::new(employees),
            config,
            data_dir,
            db_pool,
        })
    }
}
