// SPDX-License-Identifier: MIT

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{DayLocationBucket, LocationSample, RouteEntry};
use crate::time_utils;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// API routes (require a session token).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user-data", get(user_data))
        .route("/add-route", post(add_route))
        .route("/get-routes", get(get_routes))
        .route("/list-routes", get(list_routes))
        .route("/send-current-location", post(send_current_location))
        .route("/get-current-location", get(get_current_location))
        .route("/get-latest-location", get(get_latest_location))
}

// ─── User Data ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserDataResponse {
    pub message: String,
    pub uid: String,
    pub email: String,
    pub display_name: String,
}

/// Echo the identity claims embedded in the session token.
async fn user_data(Extension(user): Extension<AuthUser>) -> Json<UserDataResponse> {
    Json(UserDataResponse {
        message: "User data".to_string(),
        uid: user.uid,
        email: user.email,
        display_name: user.display_name,
    })
}

// ─── Route Log ───────────────────────────────────────────────

#[derive(Deserialize)]
struct AddRouteRequest {
    route_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Serialize)]
pub struct AddRouteResponse {
    pub message: String,
    pub route: RouteEntry,
    pub user_uid: String,
}

/// Append a new route entry under the user's route collection.
///
/// No idempotency: duplicate calls create duplicate entries.
async fn add_route(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<AddRouteRequest>,
) -> Result<Json<AddRouteResponse>> {
    let (route_name, latitude, longitude) =
        match (body.route_name, body.latitude, body.longitude) {
            (Some(name), Some(lat), Some(lng)) if !name.is_empty() => (name, lat, lng),
            _ => {
                return Err(AppError::BadRequest(
                    "Route name, latitude, and longitude are required".to_string(),
                ))
            }
        };

    // Existence check first so an unknown uid never produces a partial write.
    state.db.require_user(&user.uid).await?;

    let entry = RouteEntry {
        id: uuid::Uuid::new_v4().to_string(),
        route_name,
        latitude,
        longitude,
        timestamp: time_utils::utc_now_rfc3339(),
    };

    state.db.add_route(&user.uid, &entry).await?;

    tracing::info!(uid = %user.uid, route_id = %entry.id, "Route added");

    Ok(Json(AddRouteResponse {
        message: "Route added successfully".to_string(),
        route: entry,
        user_uid: user.uid,
    }))
}

/// Day-keyed location buckets for the user.
///
/// Despite the name, this endpoint returns the location buckets rather than
/// the route entries; existing clients depend on that shape, so it is kept.
/// `/list-routes` below is the correctly-named listing of route entries.
async fn get_routes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<BTreeMap<String, DayLocationBucket>>> {
    state.db.require_user(&user.uid).await?;

    let days = state.ledger.all_days(&user.uid).await?;
    Ok(Json(days))
}

#[derive(Serialize)]
pub struct ListRoutesResponse {
    pub routes: Vec<RouteEntry>,
}

/// List the user's route entries, oldest first.
async fn list_routes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ListRoutesResponse>> {
    state.db.require_user(&user.uid).await?;

    let routes = state.db.get_route_entries(&user.uid).await?;
    Ok(Json(ListRoutesResponse { routes }))
}

// ─── Location Ledger ─────────────────────────────────────────

#[derive(Deserialize)]
struct SendLocationRequest {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Serialize)]
pub struct SendLocationResponse {
    pub message: String,
}

/// Append the current location into today's bucket.
async fn send_current_location(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<SendLocationRequest>,
) -> Result<Json<SendLocationResponse>> {
    let (latitude, longitude) = match (body.latitude, body.longitude) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            return Err(AppError::BadRequest(
                "Latitude and longitude are required".to_string(),
            ))
        }
    };

    state.db.require_user(&user.uid).await?;
    state.ledger.submit(&user.uid, latitude, longitude).await?;

    Ok(Json(SendLocationResponse {
        message: "Current location added successfully".to_string(),
    }))
}

/// Today's bucket, or 404 if nothing was submitted today.
async fn get_current_location(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DayLocationBucket>> {
    state.db.require_user(&user.uid).await?;

    let bucket = state.ledger.today(&user.uid).await?.ok_or_else(|| {
        AppError::NoData("No current location data found for today".to_string())
    })?;

    Ok(Json(bucket))
}

/// The most recent sample across all days, or 404 if none exists.
async fn get_latest_location(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<LocationSample>> {
    state.db.require_user(&user.uid).await?;

    let sample = state
        .ledger
        .latest(&user.uid)
        .await?
        .ok_or_else(|| AppError::NoData("No location data found".to_string()))?;

    Ok(Json(sample))
}
