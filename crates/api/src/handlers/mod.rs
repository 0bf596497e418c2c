pub mod assignment;
pub mod availability;
pub mod schedule;
pub mod time_off;

use chrono::Utc;
use dispatch_core::types::Timestamp;
use serde::Deserialize;

/// Optional evaluation instant for read-only availability views.
#[derive(Debug, Default, Deserialize)]
pub struct AtQuery {
    /// RFC 3339 instant; defaults to the current time.
    pub at: Option<Timestamp>,
}

impl AtQuery {
    pub fn instant(&self) -> Timestamp {
        self.at.unwrap_or_else(Utc::now)
    }
}
