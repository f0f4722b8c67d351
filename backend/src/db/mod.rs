//! Store adapter for the Users and Exercises collections.
//!
//! Storage backends sit behind the repository traits so the HTTP layer never
//! depends on a concrete database:
//!
//! - `services`: Repository-agnostic operations used by the handlers
//! - `repository`: Trait definitions and error types
//! - `repositories::local`: In-memory implementation (default)
//! - `repositories::postgres`: Postgres implementation with Diesel ORM
//! - `factory`: Builds the repository handle from env or `repository.toml`
//!
//! # Usage
//!
//! ```no_run
//! use exercise_tracker::db::{services, RepositoryFactory};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = RepositoryFactory::from_env().await?;
//! let user = services::create_user(repo.as_ref(), "alice").await?;
//! println!("created {}", user.id);
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;


// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    ErrorContext, ExerciseRepository, FullRepository, RepositoryError, RepositoryResult,
    UserRepository,
};
