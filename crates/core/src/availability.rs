//! Effective availability rule engine.
//!
//! [`compute_effective_availability`] is the single rule combining a
//! technician's status, manual toggle, shift for the day, and time off.
//! List views, profile views, and acceptance re-checks all go through it
//! (usually via [`TechnicianSnapshot`]); nothing else may re-derive the
//! verdict.
//!
//! All evaluation happens against one UTC instant. Weekdays are numbered
//! Monday = 0 through Sunday = 6.

use chrono::{Datelike, Timelike};
use serde::Serialize;

use crate::technician::TechnicianStatus;
use crate::types::{Date, TimeOfDay, Timestamp};

/// Display format for shift boundaries.
const SHIFT_TIME_FORMAT: &str = "%H:%M";

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One day's row of a technician's weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySchedule {
    pub day_of_week: i16,
    pub is_enabled: bool,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Inclusive date range of a non-cancelled time-off entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOffSpan {
    pub start_date: Date,
    pub end_date: Date,
}

impl TimeOffSpan {
    pub fn covers(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Flattened inputs to the availability rule for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityInputs {
    pub status: TechnicianStatus,
    pub manual_availability: bool,
    /// The schedule row for the instant's weekday, if one exists.
    pub schedule: Option<DaySchedule>,
    pub has_active_time_off: bool,
    pub current_time: TimeOfDay,
}

// ---------------------------------------------------------------------------
// The rule
// ---------------------------------------------------------------------------

/// Decide whether a technician can receive work at the given instant.
///
/// The shift window is half-open: `start_time <= now < end_time`.
pub fn compute_effective_availability(inputs: &AvailabilityInputs) -> bool {
    if inputs.status != TechnicianStatus::Active {
        return false;
    }
    if !inputs.manual_availability {
        return false;
    }
    let Some(schedule) = inputs.schedule else {
        return false;
    };
    if !schedule.is_enabled {
        return false;
    }
    if !is_within_shift(schedule.start_time, schedule.end_time, inputs.current_time) {
        return false;
    }
    !inputs.has_active_time_off
}

/// Half-open shift membership test.
pub fn is_within_shift(start: TimeOfDay, end: TimeOfDay, at: TimeOfDay) -> bool {
    start <= at && at < end
}

/// Weekday index of a date, Monday = 0.
pub fn weekday_index(date: Date) -> i16 {
    date.weekday().num_days_from_monday() as i16
}

/// Render a shift as `HH:MM-HH:MM`.
pub fn format_shift_window(start: TimeOfDay, end: TimeOfDay) -> String {
    format!(
        "{}-{}",
        start.format(SHIFT_TIME_FORMAT),
        end.format(SHIFT_TIME_FORMAT)
    )
}

/// Time of day of a UTC instant, without sub-second precision noise.
fn time_of_day(now: Timestamp) -> TimeOfDay {
    let time = now.time();
    time.with_nanosecond(0).unwrap_or(time)
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything the engine needs to know about one technician.
///
/// `time_off` must contain only non-cancelled entries. Loading just the
/// entries that end on or after the evaluation date is sufficient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnicianSnapshot {
    pub status: TechnicianStatus,
    pub manual_availability: bool,
    pub weekly_schedule: Vec<DaySchedule>,
    pub time_off: Vec<TimeOffSpan>,
}

/// Derived availability facts for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilitySummary {
    pub effective_availability: bool,
    pub on_leave_now: bool,
    pub current_shift_window: Option<String>,
    pub next_time_off_start: Option<Date>,
}

impl TechnicianSnapshot {
    pub fn schedule_for(&self, day_of_week: i16) -> Option<&DaySchedule> {
        self.weekly_schedule
            .iter()
            .find(|entry| entry.day_of_week == day_of_week)
    }

    pub fn inputs_at(&self, now: Timestamp) -> AvailabilityInputs {
        let today = now.date_naive();
        AvailabilityInputs {
            status: self.status,
            manual_availability: self.manual_availability,
            schedule: self.schedule_for(weekday_index(today)).copied(),
            has_active_time_off: self.is_on_leave(today),
            current_time: time_of_day(now),
        }
    }

    pub fn effective_availability(&self, now: Timestamp) -> bool {
        compute_effective_availability(&self.inputs_at(now))
    }

    /// Whether any non-cancelled time off covers `date`.
    pub fn is_on_leave(&self, date: Date) -> bool {
        self.time_off.iter().any(|span| span.covers(date))
    }

    /// Today's shift as `HH:MM-HH:MM`, or `None` when the day is absent
    /// or disabled.
    pub fn current_shift_window(&self, now: Timestamp) -> Option<String> {
        self.schedule_for(weekday_index(now.date_naive()))
            .filter(|entry| entry.is_enabled)
            .map(|entry| format_shift_window(entry.start_time, entry.end_time))
    }

    /// Earliest time-off start on or after `from_date`.
    pub fn next_time_off_start(&self, from_date: Date) -> Option<Date> {
        self.time_off
            .iter()
            .map(|span| span.start_date)
            .filter(|start| *start >= from_date)
            .min()
    }

    pub fn summary(&self, now: Timestamp) -> AvailabilitySummary {
        let today = now.date_naive();
        AvailabilitySummary {
            effective_availability: self.effective_availability(now),
            on_leave_now: self.is_on_leave(today),
            current_shift_window: self.current_shift_window(now),
            next_time_off_start: self.next_time_off_start(today),
        }
    }
}
