// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage, keyed by uid)
//! - Routes (`users/{uid}/routes/{id}`)
//! - Day location buckets (`users/{uid}/CurrentLocation/{date}`)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{DayLocationBucket, RouteEntry, User};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // The emulator ignores auth, but the client still wants a token source.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Parent path for a user's sub-collections.
    fn user_path(&self, uid: &str) -> Result<firestore::ParentPathBuilder, AppError> {
        self.get_client()?
            .parent_path(collections::USERS, uid)
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user profile by uid.
    pub async fn get_user(&self, uid: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user profile, failing with `UserNotFound` if the uid does not resolve.
    pub async fn require_user(&self, uid: &str) -> Result<User, AppError> {
        self.get_user(uid)
            .await?
            .ok_or_else(|| AppError::UserNotFound(format!("User with UID {} not found", uid)))
    }

    /// Store a user profile (created once at registration).
    pub async fn set_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.uid)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Route Log Operations ────────────────────────────────────

    /// Store a new route entry under the user's route collection.
    pub async fn add_route(&self, uid: &str, entry: &RouteEntry) -> Result<(), AppError> {
        let parent = self.user_path(uid)?;

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ROUTES)
            .document_id(&entry.id)
            .parent(&parent)
            .object(entry)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List all route entries for a user, oldest first.
    pub async fn get_route_entries(&self, uid: &str) -> Result<Vec<RouteEntry>, AppError> {
        let parent = self.user_path(uid)?;

        let mut entries: Vec<RouteEntry> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::ROUTES)
            .parent(&parent)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(entries)
    }

    // ─── Day Location Bucket Operations ──────────────────────────

    /// Get the location bucket for one calendar date, if it exists.
    pub async fn get_location_day(
        &self,
        uid: &str,
        date: &str,
    ) -> Result<Option<DayLocationBucket>, AppError> {
        let parent = self.user_path(uid)?;

        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::CURRENT_LOCATION)
            .parent(&parent)
            .obj()
            .one(date)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write back a full day bucket, creating the document if absent.
    pub async fn set_location_day(
        &self,
        uid: &str,
        bucket: &DayLocationBucket,
    ) -> Result<(), AppError> {
        let parent = self.user_path(uid)?;

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::CURRENT_LOCATION)
            .document_id(&bucket.date)
            .parent(&parent)
            .object(bucket)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// List all day buckets for a user, sorted ascending by date.
    ///
    /// Firestore does not guarantee iteration order for a plain collection
    /// scan, so we sort on the date key before returning.
    pub async fn list_location_days(
        &self,
        uid: &str,
    ) -> Result<Vec<DayLocationBucket>, AppError> {
        let parent = self.user_path(uid)?;

        let mut buckets: Vec<DayLocationBucket> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::CURRENT_LOCATION)
            .parent(&parent)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        buckets.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(buckets)
    }
}
