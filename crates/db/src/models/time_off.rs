//! Time-off entry models and DTOs.
//!
//! Rows are never deleted. Cancellation stamps `cancelled_at`, after which
//! the entry is excluded from every active query.

use dispatch_core::availability::TimeOffSpan;
use dispatch_core::time_off::TimeOffEntryType;
use dispatch_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `technician_time_off` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TimeOff {
    pub id: DbId,
    pub technician_id: DbId,
    pub entry_type: String,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: String,
    pub cancelled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TimeOff {
    pub fn entry_type(&self) -> Result<TimeOffEntryType, String> {
        TimeOffEntryType::from_str_value(&self.entry_type)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled_at.is_some()
    }

    pub fn span(&self) -> TimeOffSpan {
        TimeOffSpan {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// A validated time-off entry ready for insert.
#[derive(Debug, Clone)]
pub struct CreateTimeOff {
    pub entry_type: TimeOffEntryType,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: String,
}
