//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Route log entries, sub-collection of a user document
    pub const ROUTES: &str = "routes";
    /// Day-bucketed location samples, sub-collection of a user document
    pub const CURRENT_LOCATION: &str = "CurrentLocation";
}
