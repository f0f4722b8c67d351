//! Tests for the user endpoints.
#![cfg(feature = "http-server")]

mod support;

use axum::http::StatusCode;
use serde_json::json;
use support::{get, post_form, post_json, send, test_app};

#[tokio::test]
async fn test_create_user_trims_username() {
    let (app, _repo) = test_app();

    let (status, body) = send(&app, post_json("/api/users", json!({ "username": "  alice  " }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_create_user_from_form_body() {
    let (app, _repo) = test_app();

    let (status, body) = send(&app, post_form("/api/users", "username=bob")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "bob");
}

#[tokio::test]
async fn test_same_username_twice_gets_distinct_ids() {
    let (app, repo) = test_app();

    let first = support::create_user(&app, "carol").await;
    let second = support::create_user(&app, "carol").await;

    assert_ne!(first, second);
    assert_eq!(repo.user_count(), 2);
}

#[tokio::test]
async fn test_blank_username_rejected() {
    let (app, repo) = test_app();

    for body in [json!({ "username": "   " }), json!({ "username": "" }), json!({})] {
        let (status, error) = send(&app, post_json("/api/users", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "Username is required");
        assert_eq!(error["code"], "BAD_REQUEST");
    }

    assert_eq!(repo.user_count(), 0);
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (app, repo) = test_app();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"username\":"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(repo.user_count(), 0);
}

#[tokio::test]
async fn test_list_users_in_creation_order() {
    let (app, _repo) = test_app();
    let names = ["dave", "erin", "frank"];
    let mut ids = Vec::new();
    for name in names {
        ids.push(support::create_user(&app, name).await);
    }

    let (status, body) = send(&app, get("/api/users")).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 3);
    for ((user, name), id) in users.iter().zip(names).zip(&ids) {
        assert_eq!(user["username"], name);
        assert_eq!(user["id"], id.as_str());
    }
}

#[tokio::test]
async fn test_list_users_empty() {
    let (app, _repo) = test_app();

    let (status, body) = send(&app, get("/api/users")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_store_failure_hides_details() {
    let (app, repo) = test_app();
    repo.set_healthy(false);

    let (status, body) = send(&app, post_json("/api/users", json!({ "username": "gina" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Server error", "code": "REPOSITORY_ERROR" }));

    let (status, body) = send(&app, get("/api/users")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server error");
}

#[tokio::test]
async fn test_health_reports_store_state() {
    let (app, repo) = test_app();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");

    repo.set_healthy(false);
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["database"], "connected");
}
