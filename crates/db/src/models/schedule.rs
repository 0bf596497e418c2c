//! Weekly shift rows from `technician_working_hours`.

use dispatch_core::availability::DaySchedule;
use dispatch_core::types::{DbId, TimeOfDay, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WorkingHours {
    pub id: DbId,
    pub technician_id: DbId,
    pub day_of_week: i16,
    pub is_enabled: bool,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&WorkingHours> for DaySchedule {
    fn from(row: &WorkingHours) -> Self {
        DaySchedule {
            day_of_week: row.day_of_week,
            is_enabled: row.is_enabled,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}
