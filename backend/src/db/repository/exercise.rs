//! Exercises collection.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Exercise, ExerciseFilter, NewExercise};

/// Repository trait for the Exercises collection.
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Insert an exercise for an owner the caller has already looked up.
    async fn create_exercise(&self, exercise: NewExercise) -> RepositoryResult<Exercise>;

    /// Exercises matching `filter`, in insertion order, capped at `limit` when given.
    async fn find_exercises(
        &self,
        filter: &ExerciseFilter,
        limit: Option<usize>,
    ) -> RepositoryResult<Vec<Exercise>>;
}
