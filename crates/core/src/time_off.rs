//! Time-off entry rules: date ranges, backdating, overlap, cancellation.
//!
//! Ranges are inclusive calendar dates. Cancelled entries never take part
//! in any of these checks; callers filter them out before asking.

use crate::roles::ActorRole;
use crate::types::Date;

define_literal_enum! {
    /// Kind of absence recorded in `technician_time_off.entry_type`.
    TimeOffEntryType {
        FullDay = "full_day",
        MultiDay = "multi_day",
        HalfDayMorning = "half_day_morning",
        HalfDayAfternoon = "half_day_afternoon",
        Break = "break",
    }
}

/// Which rule set governs a time-off mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOffPolicy {
    /// A technician managing their own calendar.
    SelfService,
    /// An operator managing any technician's calendar.
    Administrative,
}

impl From<ActorRole> for TimeOffPolicy {
    fn from(role: ActorRole) -> Self {
        match role {
            ActorRole::Admin => TimeOffPolicy::Administrative,
            ActorRole::Technician => TimeOffPolicy::SelfService,
        }
    }
}

/// Entry type used when the caller does not name one.
pub fn default_entry_type(start_date: Date, end_date: Date) -> TimeOffEntryType {
    if start_date == end_date {
        TimeOffEntryType::FullDay
    } else {
        TimeOffEntryType::MultiDay
    }
}

/// Resolve the stored entry type. Self-service callers must always name it.
pub fn resolve_entry_type(
    policy: TimeOffPolicy,
    requested: Option<TimeOffEntryType>,
    start_date: Date,
    end_date: Date,
) -> Result<TimeOffEntryType, String> {
    match (requested, policy) {
        (Some(entry_type), _) => Ok(entry_type),
        (None, TimeOffPolicy::Administrative) => Ok(default_entry_type(start_date, end_date)),
        (None, TimeOffPolicy::SelfService) => Err("entry_type is required".to_string()),
    }
}

pub fn validate_date_range(start_date: Date, end_date: Date) -> Result<(), String> {
    if start_date > end_date {
        return Err(format!(
            "start_date {start_date} must be on or before end_date {end_date}"
        ));
    }
    Ok(())
}

/// Reject entries starting before `today`.
pub fn validate_not_backdated(start_date: Date, today: Date) -> Result<(), String> {
    if start_date < today {
        return Err(format!(
            "start_date {start_date} is in the past; time off must start today or later"
        ));
    }
    Ok(())
}

/// Trim a reason and require it to be non-empty.
pub fn normalize_reason(reason: &str) -> Result<String, String> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err("reason must not be empty".to_string());
    }
    Ok(trimmed.to_string())
}

/// Inclusive range overlap: `[s1, e1]` and `[s2, e2]` share at least one day.
pub fn ranges_overlap(s1: Date, e1: Date, s2: Date, e2: Date) -> bool {
    s1 <= e2 && e1 >= s2
}

/// Whether an existing entry may still be cancelled on `today`.
///
/// Administrators may cancel anything that has not ended. Technicians may
/// only cancel entries that have not started yet.
pub fn validate_cancellable(
    policy: TimeOffPolicy,
    start_date: Date,
    end_date: Date,
    today: Date,
) -> Result<(), String> {
    if end_date < today {
        return Err("Cannot cancel time off that has already ended".to_string());
    }
    if policy == TimeOffPolicy::SelfService && start_date <= today {
        return Err("Cannot cancel time off that has already started".to_string());
    }
    Ok(())
}
