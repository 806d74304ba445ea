// SPDX-License-Identifier: MIT

//! Identity Toolkit REST client for account creation and password login.
//!
//! The identity provider owns user creation and password verification; this
//! client only consumes its `accounts:signUp` and `accounts:signInWithPassword`
//! endpoints and returns the provider-issued identity assertion.

use crate::error::AppError;
use serde::Deserialize;

const IDENTITY_TOOLKIT_BASE: &str = "https://identitytoolkit.googleapis.com/v1";

/// The verified identity tuple returned by the provider after login.
#[derive(Debug, Clone)]
pub struct IdentityAssertion {
    pub uid: String,
    pub email: String,
    pub display_name: String,
}

/// Identity Toolkit API client.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    /// Create a new client with the project's Web API key.
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: IDENTITY_TOOLKIT_BASE.to_string(),
            api_key,
        }
    }

    /// Create a client against a custom endpoint (auth emulator or test stub).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Create a new account, returning the provider-assigned uid.
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<String, AppError> {
        let url = format!("{}/accounts:signUp?key={}", self.base_url, self.api_key);

        let body = serde_json::json!({
            "email": email,
            "password": password,
            "displayName": display_name,
            "returnSecureToken": true,
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Identity provider request failed: {}", e)))?;

        let signup: SignInResponse = self.check_response_json(response).await?;
        Ok(signup.local_id)
    }

    /// Verify email/password, returning the provider's identity assertion.
    pub async fn password_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentityAssertion, AppError> {
        let url = format!(
            "{}/accounts:signInWithPassword?key={}",
            self.base_url, self.api_key
        );

        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Identity provider request failed: {}", e)))?;

        let signin: SignInResponse = self.check_response_json(response).await?;

        Ok(IdentityAssertion {
            uid: signin.local_id,
            email: signin.email.unwrap_or_else(|| email.to_string()),
            display_name: signin.display_name.unwrap_or_default(),
        })
    }

    /// Check response status and parse the JSON body.
    ///
    /// Identity Toolkit reports failures as HTTP errors with a
    /// `{"error": {"message": "..."}}` body (e.g. INVALID_PASSWORD,
    /// EMAIL_EXISTS); the message is surfaced as an auth error.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));

            return Err(AppError::Auth(message));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("JSON parse error: {}", e)))
    }
}

/// Successful signUp / signInWithPassword response (shared fields).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
