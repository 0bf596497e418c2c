//! Job status state machine and capacity rules for job acceptance.
//!
//! Only the `READY_FOR_TECH_ACCEPTANCE -> ASSIGNED` edge is owned here;
//! every other transition belongs to upstream job management.

use crate::error::CoreError;
use crate::types::DbId;

define_literal_enum! {
    /// Job lifecycle status as stored in `jobs.status`.
    JobStatus {
        PendingReview = "PENDING_REVIEW",
        ReadyForTechAcceptance = "READY_FOR_TECH_ACCEPTANCE",
        Dispatching = "DISPATCHING",
        Scheduled = "SCHEDULED",
        Assigned = "ASSIGNED",
        InProgress = "IN_PROGRESS",
        Delayed = "DELAYED",
        Completed = "COMPLETED",
        Cancelled = "CANCELLED",
    }
}

/// Statuses counted against a technician's `max_active_jobs`.
pub const ACTIVE_JOB_STATUSES: [JobStatus; 3] =
    [JobStatus::Assigned, JobStatus::InProgress, JobStatus::Delayed];

impl JobStatus {
    /// Whether a job in this status occupies one of its technician's slots.
    pub fn is_active(self) -> bool {
        ACTIVE_JOB_STATUSES.contains(&self)
    }

    /// Whether a technician may accept a job in this status.
    pub fn is_offerable(self) -> bool {
        self == JobStatus::ReadyForTechAcceptance
    }
}

/// Literal strings of [`ACTIVE_JOB_STATUSES`], for binding into SQL.
pub fn active_status_literals() -> Vec<&'static str> {
    ACTIVE_JOB_STATUSES.iter().map(|s| s.as_str()).collect()
}

/// Require that a job is still on offer.
///
/// `observed` is the raw column value so that an unknown literal is still
/// reported back to the caller verbatim.
pub fn require_offerable(job_id: DbId, observed: &str) -> Result<(), CoreError> {
    match JobStatus::from_str_value(observed) {
        Ok(status) if status.is_offerable() => Ok(()),
        _ => Err(CoreError::InvalidState {
            entity: "job",
            id: job_id,
            status: observed.to_string(),
            expected: JobStatus::ReadyForTechAcceptance.as_str(),
        }),
    }
}

/// Fail when taking one more job would exceed the technician's capacity.
pub fn check_capacity(
    technician_id: DbId,
    active_jobs: i64,
    max_active_jobs: i32,
) -> Result<(), CoreError> {
    if active_jobs >= i64::from(max_active_jobs) {
        return Err(CoreError::CapacityExceeded {
            technician_id,
            active_jobs,
            max_active_jobs,
        });
    }
    Ok(())
}
