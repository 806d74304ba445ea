// SPDX-License-Identifier: MIT

//! Trailpoint: per-user location tracking backend.
//!
//! This crate provides the backend API for route logging and day-bucketed
//! "current location" check-ins, with stateless JWT session authentication
//! on top of the Firebase Identity Toolkit.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{IdentityClient, LocationLedger};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub identity: IdentityClient,
    pub ledger: LocationLedger,
}
