//! In-memory local repository implementation.
//!
//! Both collections are kept as insertion-ordered `Vec`s behind a single lock,
//! which gives the same "natural order" a document store returns for
//! unsorted queries. Suitable for unit tests and local development.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::db::repository::{
    ErrorContext, ExerciseRepository, RepositoryError, RepositoryResult, UserRepository,
};
use crate::models::{
    normalize_username, Exercise, ExerciseFilter, ExerciseId, NewExercise, User, UserId,
};

/// In-memory local repository.
///
/// Cloning is cheap and every clone shares the same data.
///
/// # Example
/// ```
/// use exercise_tracker::db::repositories::LocalRepository;
/// use exercise_tracker::db::UserRepository;
///
/// # tokio_test_block_on(async {
/// let repo = LocalRepository::new();
/// let user = repo.create_user("alice").await.unwrap();
/// assert_eq!(repo.user_count(), 1);
/// assert_eq!(repo.find_user_by_id(user.id).await.unwrap().username, "alice");
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    users: Vec<User>,
    exercises: Vec<Exercise>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            exercises: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    ///
    /// While unhealthy every collection operation fails with a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Get the number of users stored.
    pub fn user_count(&self) -> usize {
        self.data.read().users.len()
    }

    /// Get the number of exercises stored.
    pub fn exercise_count(&self) -> usize {
        self.data.read().exercises.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Database is not healthy",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn create_user(&self, username: &str) -> RepositoryResult<User> {
        self.check_health("create_user")?;
        let username = normalize_username(username).ok_or_else(|| {
            RepositoryError::validation_with_context(
                "Username is required",
                ErrorContext::new("create_user").with_entity("user"),
            )
        })?;

        let user = User::new(UserId::generate(), username);
        self.data.write().users.push(user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        self.check_health("list_users")?;
        Ok(self.data.read().users.clone())
    }

    async fn find_user_by_id(&self, id: UserId) -> RepositoryResult<User> {
        self.check_health("find_user_by_id")?;
        self.data
            .read()
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "User not found",
                    ErrorContext::new("find_user_by_id")
                        .with_entity("user")
                        .with_entity_id(id),
                )
            })
    }
}

#[async_trait]
impl ExerciseRepository for LocalRepository {
    async fn create_exercise(&self, exercise: NewExercise) -> RepositoryResult<Exercise> {
        self.check_health("create_exercise")?;
        let exercise = exercise.into_exercise(ExerciseId::generate());
        self.data.write().exercises.push(exercise.clone());
        Ok(exercise)
    }

    async fn find_exercises(
        &self,
        filter: &ExerciseFilter,
        limit: Option<usize>,
    ) -> RepositoryResult<Vec<Exercise>> {
        self.check_health("find_exercises")?;
        let data = self.data.read();
        let matching = data.exercises.iter().filter(|e| filter.matches(e)).cloned();
        Ok(match limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }
}
