//! Database primitives: pool wiring, the per-entity mappers and pagination.

pub mod departments;
pub mod employees;
pub mod page;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::info;

pub use employees::{Employee, EmployeeChanges, NewEmployee};
pub use page::{PageInfo, PageRequest};

/// Shared connection pool.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing (set {0})")]
    MissingUrl(String),
    #[error("invalid value `{value}` for {key}")]
    InvalidSetting { key: &'static str, value: String },
    #[error("failed to connect to database")]
    Connect(#[source] DbErr),
    #[error("employee name `{0}` is already taken")]
    NameTaken(String),
    #[error("department {0:?} does not exist")]
    UnknownDepartment(Option<i32>),
    #[error(transparent)]
    Query(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    env_key: String,
    max_connections: Option<u32>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self::new("DATABASE_URL")
    }
}

impl DatabaseSettings {
    pub fn new(env_key: impl Into<String>) -> Self {
        Self {
            env_key: env_key.into(),
            max_connections: None,
        }
    }

    /// Reads `DB_MAX_CONNECTIONS` on top of the default `DATABASE_URL` key.
    pub fn from_env() -> DbResult<Self> {
        let mut settings = Self::default();
        if let Ok(raw) = std::env::var("DB_MAX_CONNECTIONS") {
            let max = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|max| *max > 0)
                .ok_or(DbError::InvalidSetting {
                    key: "DB_MAX_CONNECTIONS",
                    value: raw.clone(),
                })?;
            settings.max_connections = Some(max);
        }
        Ok(settings)
    }

    pub fn database_url(&self) -> DbResult<String> {
        std::env::var(&self.env_key).map_err(|_| DbError::MissingUrl(self.env_key.clone()))
    }
}

/// Open the pool described by `settings`.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    let mut options = ConnectOptions::new(url);
    options.sqlx_logging(false);
    if let Some(max) = settings.max_connections {
        options.max_connections(max);
    }
    let pool = Database::connect(options).await.map_err(DbError::Connect)?;
    info!(backend = ?pool.get_database_backend(), "database pool ready");
    Ok(pool)
}
