//! High-level database service layer.
//!
//! Repository-agnostic operations used by the HTTP handlers. These functions
//! hold the input rules that must be identical for every storage backend:
//! username trimming, identifier parsing, and description checks.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers (http/handlers.rs)                       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! │  - UserRepository                                       │
//! │  - ExerciseRepository                                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                 │
//! ┌───▼──────────────┐     ┌──────────▼──────────────┐
//! │ Postgres (Diesel)│     │ Local Repository        │
//! │                  │     │ (in-memory)             │
//! └──────────────────┘     └─────────────────────────┘
//! ```

use tracing::{debug, info};

use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{normalize_username, Exercise, ExerciseFilter, NewExercise, User, UserId};

// ==================== Health & Connection ====================

/// Check if the database connection is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Users ====================

/// Create a user from raw input.
///
/// The username is trimmed before it is stored; blank input is rejected with
/// a validation error and nothing is written.
pub async fn create_user<R: FullRepository + ?Sized>(
    repo: &R,
    raw_username: &str,
) -> RepositoryResult<User> {
    let username = normalize_username(raw_username).ok_or_else(|| {
        RepositoryError::validation_with_context(
            "Username is required",
            ErrorContext::new("create_user").with_entity("user"),
        )
    })?;

    let user = repo.create_user(username).await?;
    info!(user_id = %user.id, username = %user.username, "created user");
    Ok(user)
}

/// List every user in store-natural order.
pub async fn list_users<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<User>> {
    repo.list_users().await
}

/// Look up a user by the textual form of its id.
///
/// Text that is not a well-formed identifier is reported exactly like an
/// unknown id.
pub async fn find_user_by_id<R: FullRepository + ?Sized>(
    repo: &R,
    raw_id: &str,
) -> RepositoryResult<User> {
    let id: UserId = raw_id.parse().map_err(|_| {
        debug!(raw_id, "rejecting malformed user id");
        RepositoryError::not_found_with_context(
            "User not found",
            ErrorContext::new("find_user_by_id")
                .with_entity("user")
                .with_entity_id(raw_id),
        )
    })?;

    repo.find_user_by_id(id).await
}

// ==================== Exercises ====================

/// Store an exercise for a user that has already been looked up.
pub async fn create_exercise<R: FullRepository + ?Sized>(
    repo: &R,
    exercise: NewExercise,
) -> RepositoryResult<Exercise> {
    if exercise.description.trim().is_empty() {
        return Err(RepositoryError::validation_with_context(
            "Description is required",
            ErrorContext::new("create_exercise").with_entity("exercise"),
        ));
    }

    let exercise = repo.create_exercise(exercise).await?;
    info!(
        exercise_id = %exercise.id,
        user_id = %exercise.user_id,
        date = %exercise.date,
        "logged exercise"
    );
    Ok(exercise)
}

/// Fetch a user's exercises matching `filter`, capped at `limit` entries.
pub async fn find_exercises<R: FullRepository + ?Sized>(
    repo: &R,
    filter: &ExerciseFilter,
    limit: Option<usize>,
) -> RepositoryResult<Vec<Exercise>> {
    let exercises = repo.find_exercises(filter, limit).await?;
    debug!(
        user_id = %filter.user_id,
        from = ?filter.from,
        to = ?filter.to,
        limit = ?limit,
        returned = exercises.len(),
        "fetched exercise log"
    );
    Ok(exercises)
}
