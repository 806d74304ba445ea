//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
///
/// Created once at registration, keyed by the identity provider's uid.
/// Never mutated by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Identity provider uid (also used as document ID)
    pub uid: String,
    /// Email address
    pub email: String,
    /// Display name chosen at registration
    pub display_name: String,
    /// When the account was created (RFC3339)
    pub created_at: String,
}
