// SPDX-License-Identifier: MIT

//! Request validation tests.
//!
//! Missing required fields must yield 400 `validation_error` before any
//! collaborator call, so these all pass against the offline mock database.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

mod common;

fn create_test_token(signing_key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims {
        uid: String,
        email: String,
        display_name: String,
        iat: usize,
        exp: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        uid: "uid-1".to_string(),
        email: "a@x.com".to_string(),
        display_name: "A".to_string(),
        iat: now,
        exp: now + 3600,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

async fn post_json(
    app: axum::Router,
    uri: &str,
    auth: Option<&str>,
    body: serde_json::Value,
) -> axum::response::Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = auth {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

async fn body_error(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    json["error"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_register_missing_fields() {
    let (app, _) = common::create_test_app();

    let response = post_json(
        app,
        "/register",
        None,
        serde_json::json!({"email": "a@x.com", "password": "p1"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_error(response).await, "validation_error");
}

#[tokio::test]
async fn test_register_empty_fields() {
    let (app, _) = common::create_test_app();

    let response = post_json(
        app,
        "/register",
        None,
        serde_json::json!({"email": "", "password": "p1", "display_name": "A"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_missing_password() {
    let (app, _) = common::create_test_app();

    let response = post_json(app, "/login", None, serde_json::json!({"email": "a@x.com"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_error(response).await, "validation_error");
}

#[tokio::test]
async fn test_add_route_missing_name() {
    let (app, state) = common::create_test_app();
    let token = create_test_token(&state.config.jwt_signing_key);

    let response = post_json(
        app,
        "/add-route",
        Some(&format!("Bearer {}", token)),
        serde_json::json!({"latitude": 1.0, "longitude": 2.0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_error(response).await, "validation_error");
}

#[tokio::test]
async fn test_add_route_missing_coordinates() {
    let (app, state) = common::create_test_app();
    let token = create_test_token(&state.config.jwt_signing_key);

    let response = post_json(
        app,
        "/add-route",
        Some(&format!("Bearer {}", token)),
        serde_json::json!({"route_name": "Morning Run", "latitude": 1.0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_send_location_missing_longitude() {
    let (app, state) = common::create_test_app();
    let token = create_test_token(&state.config.jwt_signing_key);

    let response = post_json(
        app,
        "/send-current-location",
        Some(&format!("Bearer {}", token)),
        serde_json::json!({"latitude": 10.0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_error(response).await, "validation_error");
}

#[tokio::test]
async fn test_send_location_validation_precedes_user_lookup() {
    // The offline db would return 500 on the user lookup; a 400 here proves
    // validation runs first.
    let (app, state) = common::create_test_app();
    let token = create_test_token(&state.config.jwt_signing_key);

    let response = post_json(
        app,
        "/send-current-location",
        Some(&format!("Bearer {}", token)),
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
