//! Route log entries.

use serde::{Deserialize, Serialize};

/// A single named route entry, immutable once written.
///
/// Stored in `users/{uid}/routes/{id}` with a generated uuid as document ID.
/// Append-only; there are no update or delete operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Generated unique identifier (uuid v4)
    pub id: String,
    pub route_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// When the entry was submitted (RFC3339, UTC)
    pub timestamp: String,
}
