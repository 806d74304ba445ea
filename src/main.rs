// SPDX-License-Identifier: MIT

//! Trailpoint API Server
//!
//! Tracks per-user routes and current-location check-ins, authenticating
//! against the Firebase Identity Toolkit and storing everything in Firestore.

use std::sync::Arc;
use trailpoint::{
    config::Config,
    db::FirestoreDb,
    services::{IdentityClient, LocationLedger},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Trailpoint API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Identity Toolkit client for account creation and password login
    let identity = IdentityClient::new(config.firebase_api_key.clone());
    tracing::info!("Identity Toolkit client initialized");

    // Location ledger with per-(user, day) write serialization
    let ledger = LocationLedger::new(db.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        identity,
        ledger,
    });

    // Build router
    let app = trailpoint::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trailpoint=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
