pub mod calendar;
pub mod exercise;
pub mod ids;
pub mod macros;
pub mod user;

pub use calendar::{format_calendar_date, parse_calendar_date, today_utc, InvalidDate};
pub use exercise::{
    duration_from_f64, parse_duration_minutes, Exercise, ExerciseFilter, InvalidDuration,
    NewExercise,
};
pub use ids::{ExerciseId, UserId};
pub use user::{normalize_username, User};
