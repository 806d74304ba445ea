// SPDX-License-Identifier: MIT

//! Location ledger: the per-user, per-day accumulation of location samples.
//!
//! Samples are appended into one Firestore document per (user, UTC calendar
//! date). The document read-modify-write is serialized through an in-process
//! lock keyed by (uid, date), so two concurrent submissions for the same user
//! and day cannot overwrite each other's append.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{DayLocationBucket, LocationSample};
use crate::time_utils;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Per-user location ledger backed by Firestore day buckets.
#[derive(Clone)]
pub struct LocationLedger {
    db: FirestoreDb,
    /// Write locks keyed by `{uid}/{date}`. Entries are cheap and short-lived
    /// within a single instance; stale days simply stay unlocked.
    day_locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl LocationLedger {
    pub fn new(db: FirestoreDb) -> Self {
        Self {
            db,
            day_locks: Arc::new(DashMap::new()),
        }
    }

    /// Append one sample to today's bucket, creating it on first submission
    /// of the day. Returns the date key the sample was filed under.
    pub async fn submit(&self, uid: &str, latitude: f64, longitude: f64) -> Result<String, AppError> {
        let date = time_utils::current_utc_date();
        let sample = LocationSample {
            latitude,
            longitude,
            timestamp: time_utils::utc_now_rfc3339(),
        };

        let lock = self
            .day_locks
            .entry(format!("{}/{}", uid, date))
            .or_default()
            .clone();
        let _guard = lock.lock().await;

        let mut bucket = self
            .db
            .get_location_day(uid, &date)
            .await?
            .unwrap_or_else(|| DayLocationBucket::empty(date.clone()));

        bucket.locations.push(sample);
        self.db.set_location_day(uid, &bucket).await?;

        tracing::debug!(
            uid,
            date = %date,
            samples = bucket.locations.len(),
            "Location sample appended"
        );

        Ok(date)
    }

    /// Today's bucket, verbatim, if any submission occurred today.
    pub async fn today(&self, uid: &str) -> Result<Option<DayLocationBucket>, AppError> {
        let date = time_utils::current_utc_date();
        self.db.get_location_day(uid, &date).await
    }

    /// The most recent sample across all day buckets.
    ///
    /// Buckets are sorted ascending by date key and the last sample of the
    /// latest non-empty bucket wins; collection iteration order alone is not
    /// trustworthy for "latest".
    pub async fn latest(&self, uid: &str) -> Result<Option<LocationSample>, AppError> {
        let buckets = self.db.list_location_days(uid).await?;

        Ok(buckets
            .into_iter()
            .rev()
            .find_map(|bucket| bucket.locations.into_iter().last()))
    }

    /// All day buckets for a user as a date-keyed mapping.
    pub async fn all_days(&self, uid: &str) -> Result<BTreeMap<String, DayLocationBucket>, AppError> {
        let buckets = self.db.list_location_days(uid).await?;

        Ok(buckets
            .into_iter()
            .map(|bucket| (bucket.date.clone(), bucket))
            .collect())
    }
}
