//! Users collection.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{User, UserId};

/// Repository trait for the Users collection.
///
/// Implementations must be `Send + Sync` to be shared across request handlers.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Insert a new user and return it with its assigned id.
    ///
    /// # Errors
    /// `ValidationError` if `username` is empty or all whitespace.
    async fn create_user(&self, username: &str) -> RepositoryResult<User>;

    /// All users in insertion order.
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;

    /// Exact lookup by id.
    ///
    /// # Errors
    /// `NotFound` if no user has this id.
    async fn find_user_by_id(&self, id: UserId) -> RepositoryResult<User>;
}
