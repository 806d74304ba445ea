// SPDX-License-Identifier: MIT

//! Registration and login routes.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::create_session_token;
use crate::models::User;
use crate::time_utils;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

// ─── Registration ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    email: Option<String>,
    password: Option<String>,
    display_name: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub uid: String,
    pub message: String,
}

/// Create an account with the identity provider, then store the profile.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    let (email, password, display_name) = match (body.email, body.password, body.display_name) {
        (Some(e), Some(p), Some(d)) if !e.is_empty() && !p.is_empty() && !d.is_empty() => {
            (e, p, d)
        }
        _ => {
            return Err(AppError::BadRequest(
                "Email, password, and display name required".to_string(),
            ))
        }
    };

    let uid = state
        .identity
        .create_account(&email, &password, &display_name)
        .await?;

    let user = User {
        uid: uid.clone(),
        email,
        display_name,
        created_at: time_utils::utc_now_rfc3339(),
    };
    state.db.set_user(&user).await?;

    tracing::info!(uid = %uid, "User registered");

    Ok(Json(RegisterResponse {
        uid,
        message: "User created successfully".to_string(),
    }))
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub display_name: String,
}

/// Verify credentials with the identity provider and mint a session token.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (email, password) = match (body.email, body.password) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
        _ => {
            return Err(AppError::BadRequest(
                "Email and password required".to_string(),
            ))
        }
    };

    let assertion = state.identity.password_login(&email, &password).await?;

    let token = create_session_token(&assertion, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token creation failed: {}", e)))?;

    tracing::info!(uid = %assertion.uid, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        display_name: assertion.display_name,
    }))
}
