//! Location samples and per-day buckets.

use serde::{Deserialize, Serialize};

/// A single geolocation sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    /// When the sample was submitted (RFC3339, UTC)
    pub timestamp: String,
}

/// The per-user, per-calendar-date aggregate of location samples.
///
/// Stored in `users/{uid}/CurrentLocation/{date}`. Exactly one bucket exists
/// per (user, date); the date is both the document ID and a field so the
/// bucket round-trips with its key. The sequence is append-only in insertion
/// order, which is chronological because insertion happens at call time. The
/// last element of today's bucket is the authoritative current location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLocationBucket {
    /// ISO calendar date (`YYYY-MM-DD`), matches the document ID
    pub date: String,
    /// Samples in submission order
    pub locations: Vec<LocationSample>,
}

impl DayLocationBucket {
    /// Create an empty bucket for the given date.
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            locations: Vec::new(),
        }
    }

    /// The most recent sample in this bucket, if any.
    pub fn last_sample(&self) -> Option<&LocationSample> {
        self.locations.last()
    }
}
