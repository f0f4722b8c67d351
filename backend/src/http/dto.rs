//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies arrive either as JSON or as form fields, so every input
//! field is optional here and presence is checked in the handlers.

use serde::{Deserialize, Serialize};

use crate::models::{
    duration_from_f64, format_calendar_date, parse_duration_minutes, Exercise, InvalidDuration,
    User,
};

/// Request body for `POST /api/users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
}

/// A user as rendered by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
        }
    }
}

/// Duration as sent by clients: a JSON number or text (form bodies are always text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Int(i64),
    Float(f64),
    Text(String),
}

impl DurationInput {
    /// Whole minutes; fractional values are truncated toward zero.
    pub fn to_minutes(&self) -> Result<i64, InvalidDuration> {
        match self {
            DurationInput::Int(minutes) => Ok(*minutes),
            DurationInput::Float(value) => {
                duration_from_f64(*value).ok_or_else(|| InvalidDuration(value.to_string()))
            }
            DurationInput::Text(raw) => parse_duration_minutes(raw),
        }
    }
}

/// Request body for `POST /api/users/{id}/exercises`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddExerciseRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<DurationInput>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Response for a logged exercise, merged with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseResponse {
    pub id: String,
    pub username: String,
    pub date: String,
    pub duration: i64,
    pub description: String,
}

impl ExerciseResponse {
    pub fn new(user: &User, exercise: Exercise) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            date: format_calendar_date(exercise.date),
            duration: exercise.duration,
            description: exercise.description,
        }
    }
}

/// Query parameters for `GET /api/users/{id}/logs`.
///
/// Kept as raw text so that malformed values can be handled per field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// One entry of a user's exercise log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            description: exercise.description,
            duration: exercise.duration,
            date: format_calendar_date(exercise.date),
        }
    }
}

/// Response for `GET /api/users/{id}/logs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogResponse {
    pub id: String,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

impl LogResponse {
    pub fn new(user: User, exercises: Vec<Exercise>) -> Self {
        let log: Vec<LogEntry> = exercises.into_iter().map(LogEntry::from).collect();
        Self {
            id: user.id.to_string(),
            username: user.username,
            count: log.len(),
            log,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
