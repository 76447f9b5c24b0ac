//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp recorded when a score is submitted.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
