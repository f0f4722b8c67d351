//! Exercise records and the query filter applied when reading a user's log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{ExerciseId, UserId};

/// A logged exercise. `duration` is in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub user_id: UserId,
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
}

/// Exercise fields supplied by the caller; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    pub user_id: UserId,
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
}

impl NewExercise {
    pub fn into_exercise(self, id: ExerciseId) -> Exercise {
        Exercise {
            id,
            user_id: self.user_id,
            description: self.description,
            duration: self.duration,
            date: self.date,
        }
    }
}

/// Conjunction of an exact owner match and optional inclusive date bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub user_id: UserId,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ExerciseFilter {
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            from: None,
            to: None,
        }
    }

    pub fn with_from(mut self, from: Option<NaiveDate>) -> Self {
        self.from = from;
        self
    }

    pub fn with_to(mut self, to: Option<NaiveDate>) -> Self {
        self.to = to;
        self
    }

    pub fn matches(&self, exercise: &Exercise) -> bool {
        exercise.user_id == self.user_id
            && self.from.map_or(true, |from| exercise.date >= from)
            && self.to.map_or(true, |to| exercise.date <= to)
    }
}

/// Error produced when a duration cannot be read as whole minutes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid duration: {0:?} is not a number")]
pub struct InvalidDuration(pub String);

/// Read a duration given as text. Decimal values are truncated toward zero.
pub fn parse_duration_minutes(raw: &str) -> Result<i64, InvalidDuration> {
    let trimmed = raw.trim();
    if let Ok(minutes) = trimmed.parse::<i64>() {
        return Ok(minutes);
    }
    match trimmed.parse::<f64>() {
        Ok(value) => duration_from_f64(value).ok_or_else(|| InvalidDuration(raw.to_string())),
        Err(_) => Err(InvalidDuration(raw.to_string())),
    }
}

/// Truncate a fractional duration, rejecting NaN, infinities and values outside `i64`.
pub fn duration_from_f64(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}
