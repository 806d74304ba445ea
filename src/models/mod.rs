// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod location;
pub mod route;
pub mod user;

pub use location::{DayLocationBucket, LocationSample};
pub use route::RouteEntry;
pub use user::User;
