//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Connection health monitoring
//! - Automatic migration execution
//!
//! Natural order for both collections is the `seq` column, which follows
//! insertion order.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;
use tracing::debug;

use crate::db::repository::{
    ErrorContext, ExerciseRepository, RepositoryError, RepositoryResult, UserRepository,
};
use crate::models::{
    normalize_username, Exercise, ExerciseFilter, ExerciseId, NewExercise, User, UserId,
};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();

        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    ///
    /// This blocks while the pool fills and migrations run; call it from
    /// `spawn_blocking` when already inside a runtime.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;
        debug!(count = applied.len(), "applied pending migrations");

        Ok(())
    }

    /// Run a blocking Diesel operation on a pooled connection.
    ///
    /// Failures are returned as-is; nothing is retried.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new(operation).with_details("get_connection"),
                )
            })?;

            f(&mut conn).map_err(|e| e.with_operation(operation))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

#[async_trait]
impl UserRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn create_user(&self, username: &str) -> RepositoryResult<User> {
        let username = normalize_username(username).ok_or_else(|| {
            RepositoryError::validation_with_context(
                "Username is required",
                ErrorContext::new("create_user").with_entity("user"),
            )
        })?;
        let row = NewUserRow {
            id: UserId::generate().into(),
            username: username.to_string(),
        };

        self.with_conn("create_user", move |conn| {
            diesel::insert_into(users::table)
                .values(&row)
                .returning(UserRow::as_returning())
                .get_result(conn)
                .map(User::from)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        self.with_conn("list_users", |conn| {
            let rows: Vec<UserRow> = users::table
                .select(UserRow::as_select())
                .order(users::seq.asc())
                .load(conn)
                .map_err(map_diesel_error)?;

            Ok(rows.into_iter().map(User::from).collect())
        })
        .await
    }

    async fn find_user_by_id(&self, id: UserId) -> RepositoryResult<User> {
        let key: uuid::Uuid = id.into();
        self.with_conn("find_user_by_id", move |conn| {
            users::table
                .find(key)
                .select(UserRow::as_select())
                .first(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(User::from)
                .ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        "User not found",
                        ErrorContext::new("find_user_by_id")
                            .with_entity("user")
                            .with_entity_id(id),
                    )
                })
        })
        .await
    }
}

#[async_trait]
impl ExerciseRepository for PostgresRepository {
    async fn create_exercise(&self, exercise: NewExercise) -> RepositoryResult<Exercise> {
        let row = NewExerciseRow::new(ExerciseId::generate(), exercise);

        self.with_conn("create_exercise", move |conn| {
            diesel::insert_into(exercises::table)
                .values(&row)
                .returning(ExerciseRow::as_returning())
                .get_result(conn)
                .map(Exercise::from)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn find_exercises(
        &self,
        filter: &ExerciseFilter,
        limit: Option<usize>,
    ) -> RepositoryResult<Vec<Exercise>> {
        let filter = *filter;
        let owner: uuid::Uuid = filter.user_id.into();
        let limit = limit.map(|n| i64::try_from(n).unwrap_or(i64::MAX));

        self.with_conn("find_exercises", move |conn| {
            let mut query = exercises::table
                .filter(exercises::user_id.eq(owner))
                .order(exercises::seq.asc())
                .select(ExerciseRow::as_select())
                .into_boxed();

            if let Some(from) = filter.from {
                query = query.filter(exercises::date.ge(from));
            }
            if let Some(to) = filter.to {
                query = query.filter(exercises::date.le(to));
            }
            if let Some(limit) = limit {
                query = query.limit(limit);
            }

            let rows: Vec<ExerciseRow> = query.load(conn).map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(Exercise::from).collect())
        })
        .await
    }
}
