//! Weekly shift table validation.
//!
//! A technician's schedule is replaced as a whole: exactly one entry for
//! each weekday, Monday = 0 through Sunday = 6.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::TimeOfDay;

/// Number of slots in a full weekly schedule.
pub const DAYS_PER_WEEK: usize = 7;

/// Highest valid `day_of_week` (Sunday).
pub const MAX_DAY_OF_WEEK: i16 = 6;

/// English day names indexed by `day_of_week`.
pub const DAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One slot of a weekly schedule replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct WeeklyScheduleEntryInput {
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: i16,
    pub is_enabled: bool,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Validate a full replacement: exactly seven entries, seven distinct days
/// in range, each with `end_time > start_time`.
pub fn validate_weekly_schedule(entries: &[WeeklyScheduleEntryInput]) -> Result<(), String> {
    if entries.len() != DAYS_PER_WEEK {
        return Err(format!(
            "Weekly schedule must contain exactly {DAYS_PER_WEEK} entries, got {}",
            entries.len()
        ));
    }

    let mut seen = HashSet::with_capacity(DAYS_PER_WEEK);
    for entry in entries {
        if entry.validate().is_err() {
            return Err(format!(
                "day_of_week must be between 0 and {MAX_DAY_OF_WEEK}, got {}",
                entry.day_of_week
            ));
        }
        if !seen.insert(entry.day_of_week) {
            return Err(format!(
                "Duplicate day_of_week {} in weekly schedule",
                entry.day_of_week
            ));
        }
        if entry.end_time <= entry.start_time {
            return Err(format!(
                "{}: end_time must be after start_time",
                day_name(entry.day_of_week).unwrap_or("Unknown day")
            ));
        }
    }

    Ok(())
}

pub fn day_name(day_of_week: i16) -> Option<&'static str> {
    usize::try_from(day_of_week)
        .ok()
        .and_then(|i| DAY_NAMES.get(i).copied())
}
