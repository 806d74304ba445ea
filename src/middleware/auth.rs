// SPDX-License-Identifier: MIT

//! JWT session token service and authentication middleware.
//!
//! Tokens are self-contained: claims plus an HS256 signature, verified
//! locally with zero I/O. Expiry is the only revocation mechanism.

use crate::error::AppError;
use crate::services::identity::IdentityAssertion;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Session token lifetime: 5 hours.
pub const SESSION_TTL_SECS: u64 = 5 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Identity provider uid
    pub uid: String,
    /// Email address at login time
    pub email: String,
    /// Display name at login time
    pub display_name: String,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

/// Authenticated user extracted from the session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: String,
}

/// Middleware that requires a valid session token.
///
/// Expects `Authorization: <scheme> <token>`. A missing header or a value
/// that does not split into scheme and token yields `TokenMissing` (400);
/// an expired token yields `TokenExpired` and any other decode failure
/// yields `TokenInvalid` (both 401).
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::TokenMissing)?;

    let mut parts = header_value.split_whitespace();
    let token = match (parts.next(), parts.next()) {
        (Some(_scheme), Some(token)) => token,
        _ => return Err(AppError::TokenMissing),
    };

    let claims = verify_session_token(token, &state.config.jwt_signing_key)?;

    let auth_user = AuthUser {
        uid: claims.uid,
        email: claims.email,
        display_name: claims.display_name,
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Create a session token from a verified identity assertion.
pub fn create_session_token(
    assertion: &IdentityAssertion,
    signing_key: &[u8],
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        uid: assertion.uid.clone(),
        email: assertion.email.clone(),
        display_name: assertion.display_name.clone(),
        iat: now,
        exp: now + SESSION_TTL_SECS as usize,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Verify signature and expiry, returning the embedded claims.
pub fn verify_session_token(token: &str, signing_key: &[u8]) -> Result<Claims, AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let mut validation = Validation::new(Algorithm::HS256);
    // No leeway: a token is expired the instant its exp passes.
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpired,
        _ => AppError::TokenInvalid,
    })?;

    Ok(token_data.claims)
}
