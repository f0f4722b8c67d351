//! Repository trait definitions for the two persistent collections.
//!
//! - [`error`]: Error types for repository operations
//! - [`user`]: The Users collection
//! - [`exercise`]: The Exercises collection
//!
//! For functions that need both collections, use the [`FullRepository`] bound:
//!
//! ```ignore
//! async fn log_for<R: FullRepository + ?Sized>(repo: &R, id: UserId) -> RepositoryResult<()> {
//!     let user = repo.find_user_by_id(id).await?;
//!     let log = repo.find_exercises(&ExerciseFilter::for_user(user.id), None).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod exercise;
pub mod user;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use exercise::ExerciseRepository;
pub use user::UserRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: UserRepository + ExerciseRepository {}

// Blanket implementation: anything implementing both collections is a FullRepository
impl<T> FullRepository for T where T: UserRepository + ExerciseRepository {}
