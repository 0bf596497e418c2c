use crate::readiness::AssignmentReadiness;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid state: {entity} {id} is {status}, expected {expected}")]
    InvalidState {
        entity: &'static str,
        id: DbId,
        status: String,
        expected: &'static str,
    },

    #[error(
        "Technician {} is not eligible for job {}",
        .readiness.technician_id,
        .readiness.job_id
    )]
    NotEligible {
        readiness: AssignmentReadiness,
        previously_rejected: bool,
    },

    #[error(
        "Technician {technician_id} already holds {active_jobs} active jobs (max {max_active_jobs})"
    )]
    CapacityExceeded {
        technician_id: DbId,
        active_jobs: i64,
        max_active_jobs: i32,
    },

    #[error("Timed out waiting for a lease on {entity} {id}")]
    LeaseTimeout { entity: &'static str, id: DbId },

    /// Transaction lost a lock race (lock wait timeout outside a lease, or
    /// deadlock detection). Safe to retry.
    #[error("Contention: {0}")]
    Contention(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether the caller may reasonably retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CoreError::LeaseTimeout { .. } | CoreError::Contention(_)
        )
    }
}
