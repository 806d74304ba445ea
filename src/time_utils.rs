// SPDX-License-Identifier: MIT

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current UTC time as an RFC3339 string.
pub fn utc_now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Current UTC calendar date as an ISO date string (`YYYY-MM-DD`).
///
/// This is the document key for day buckets.
pub fn current_utc_date() -> String {
    Utc::now().date_naive().to_string()
}
