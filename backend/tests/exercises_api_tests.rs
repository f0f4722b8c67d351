//! Tests for `POST /api/users/{id}/exercises`.
#![cfg(feature = "http-server")]

mod support;

use axum::http::StatusCode;
use chrono::NaiveDate;
use exercise_tracker::models::{format_calendar_date, parse_calendar_date, today_utc, UserId};
use serde_json::json;
use support::{add_exercise, post_form, send, test_app};

#[tokio::test]
async fn test_add_exercise_returns_user_and_exercise() {
    let (app, repo) = test_app();
    let id = support::create_user(&app, "alice").await;

    let (status, body) = add_exercise(
        &app,
        &id,
        json!({ "description": "run", "duration": 30, "date": "2024-01-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": id,
            "username": "alice",
            "date": "Mon Jan 15 2024",
            "duration": 30,
            "description": "run",
        })
    );
    assert_eq!(repo.exercise_count(), 1);
}

#[tokio::test]
async fn test_date_defaults_to_today() {
    let (app, _repo) = test_app();
    let id = support::create_user(&app, "bob").await;

    let before = format_calendar_date(today_utc());
    let (status, body) =
        add_exercise(&app, &id, json!({ "description": "swim", "duration": 20 })).await;
    let after = format_calendar_date(today_utc());

    assert_eq!(status, StatusCode::OK);
    let date = body["date"].as_str().unwrap();
    assert!(date == before || date == after, "unexpected date {}", date);
}

#[tokio::test]
async fn test_blank_date_treated_as_absent() {
    let (app, _repo) = test_app();
    let id = support::create_user(&app, "bob").await;

    let (status, _) = add_exercise(
        &app,
        &id,
        json!({ "description": "swim", "duration": 20, "date": "" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_response_date_round_trips() {
    let (app, _repo) = test_app();
    let id = support::create_user(&app, "bob").await;
    let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

    for supplied in ["2024-03-09", "2024-03-09T23:30:00Z", "2024-03-10T01:00:00+02:00"] {
        let (status, body) = add_exercise(
            &app,
            &id,
            json!({ "description": "row", "duration": 10, "date": supplied }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let date = body["date"].as_str().unwrap();
        assert_eq!(parse_calendar_date(date).unwrap(), expected, "supplied {}", supplied);
    }
}

#[tokio::test]
async fn test_form_body_with_textual_duration() {
    let (app, _repo) = test_app();
    let id = support::create_user(&app, "carol").await;

    let (status, body) = send(
        &app,
        post_form(
            &format!("/api/users/{}/exercises", id),
            "description=bike+ride&duration=45&date=2024-02-29",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "bike ride");
    assert_eq!(body["duration"], 45);
    assert_eq!(body["date"], "Thu Feb 29 2024");
}

#[tokio::test]
async fn test_fractional_duration_truncated() {
    let (app, _repo) = test_app();
    let id = support::create_user(&app, "dave").await;

    let (_, body) = add_exercise(
        &app,
        &id,
        json!({ "description": "walk", "duration": 12.9, "date": "2024-01-01" }),
    )
    .await;
    assert_eq!(body["duration"], 12);

    let (_, body) = add_exercise(
        &app,
        &id,
        json!({ "description": "walk", "duration": "7.5", "date": "2024-01-01" }),
    )
    .await;
    assert_eq!(body["duration"], 7);
}

#[tokio::test]
async fn test_unknown_user_is_404_and_nothing_stored() {
    let (app, repo) = test_app();
    support::create_user(&app, "erin").await;

    let unknown = UserId::generate().to_string();
    for id in [unknown.as_str(), "not-an-id"] {
        let (status, body) = add_exercise(
            &app,
            id,
            json!({ "description": "run", "duration": 10 }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");
    }

    assert_eq!(repo.exercise_count(), 0);
}

#[tokio::test]
async fn test_invalid_input_is_400_and_nothing_stored() {
    let (app, repo) = test_app();
    let id = support::create_user(&app, "frank").await;

    let cases = [
        json!({ "duration": 10 }),
        json!({ "description": "   ", "duration": 10 }),
        json!({ "description": "run" }),
        json!({ "description": "run", "duration": "lots" }),
        json!({ "description": "run", "duration": 10, "date": "yesterday" }),
        json!({ "description": "run", "duration": 10, "date": "2024-13-40" }),
    ];
    for case in cases {
        let (status, body) = add_exercise(&app, &id, case.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "case {}", case);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    assert_eq!(repo.exercise_count(), 0);
}

#[tokio::test]
async fn test_store_failure_hides_details() {
    let (app, repo) = test_app();
    let id = support::create_user(&app, "gina").await;
    repo.set_healthy(false);

    let (status, body) =
        add_exercise(&app, &id, json!({ "description": "run", "duration": 5 })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Server error", "code": "REPOSITORY_ERROR" }));
}
