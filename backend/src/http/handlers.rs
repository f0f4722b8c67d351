//! HTTP handlers for the REST API.
//!
//! Each handler validates its input, delegates to the db service layer and
//! shapes the JSON response. None of them keep state between requests.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Html,
    Json,
};
use chrono::NaiveDate;
use tracing::debug;

use super::dto::{
    AddExerciseRequest, CreateUserRequest, ExerciseResponse, HealthResponse, LogQuery,
    LogResponse, UserResponse,
};
use super::error::AppError;
use super::extract::JsonOrForm;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{parse_calendar_date, today_utc, ExerciseFilter, NewExercise};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const LANDING_PAGE: &str = include_str!("../../static/index.html");

// =============================================================================
// Landing & Health
// =============================================================================

/// GET /
pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// GET /health
///
/// Reports whether the store is reachable. Always answers 200 so that load
/// balancers can tell "process up" apart from "database down".
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Users
// =============================================================================

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<CreateUserRequest>,
) -> HandlerResult<UserResponse> {
    let username = request
        .username
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Username is required".to_string()))?;

    let user = db_services::create_user(state.repository.as_ref(), username).await?;
    Ok(Json(user.into()))
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> HandlerResult<Vec<UserResponse>> {
    let users = db_services::list_users(state.repository.as_ref()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// =============================================================================
// Exercises
// =============================================================================

/// POST /api/users/{id}/exercises
pub async fn add_exercise(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    JsonOrForm(request): JsonOrForm<AddExerciseRequest>,
) -> HandlerResult<ExerciseResponse> {
    let repo = state.repository.as_ref();
    let user = db_services::find_user_by_id(repo, &user_id).await?;

    let description = request
        .description
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Description is required".to_string()))?;

    let date = match non_blank(request.date.as_deref()) {
        Some(raw) => parse_calendar_date(raw).map_err(|e| AppError::BadRequest(e.to_string()))?,
        None => today_utc(),
    };

    let duration = request
        .duration
        .ok_or_else(|| AppError::BadRequest("Duration is required".to_string()))?
        .to_minutes()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let exercise = db_services::create_exercise(
        repo,
        NewExercise {
            user_id: user.id,
            description,
            duration,
            date,
        },
    )
    .await?;

    Ok(Json(ExerciseResponse::new(&user, exercise)))
}

/// GET /api/users/{id}/logs?from&to&limit
///
/// Store failures on this endpoint report the underlying error message.
pub async fn get_logs(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: Result<Query<LogQuery>, QueryRejection>,
) -> HandlerResult<LogResponse> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let repo = state.repository.as_ref();
    let user = db_services::find_user_by_id(repo, &user_id)
        .await
        .map_err(AppError::passthrough)?;

    let filter = ExerciseFilter::for_user(user.id)
        .with_from(parse_bound("from", query.from.as_deref())?)
        .with_to(parse_bound("to", query.to.as_deref())?);
    let limit = parse_limit(query.limit.as_deref());
    debug!(user_id = %user.id, ?filter, ?limit, "reading exercise log");

    let exercises = db_services::find_exercises(repo, &filter, limit)
        .await
        .map_err(AppError::passthrough)?;

    Ok(Json(LogResponse::new(user, exercises)))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    non_blank(raw)
        .map(|value| {
            parse_calendar_date(value)
                .map_err(|e| AppError::BadRequest(format!("Invalid '{}' parameter. {}", name, e)))
        })
        .transpose()
}

/// Positive integers cap the log; anything else means "no cap".
pub fn parse_limit(raw: Option<&str>) -> Option<usize> {
    non_blank(raw)
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|limit| *limit > 0)
        .map(|limit| usize::try_from(limit).unwrap_or(usize::MAX))
}
