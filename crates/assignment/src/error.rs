//! Service-level error type.
//!
//! Wraps the domain taxonomy and classifies raw database failures by
//! SQLSTATE so constraint and lock errors surface as domain errors.

use dispatch_core::error::CoreError;
use dispatch_db::LeaseError;

/// Postgres SQLSTATE codes with a domain meaning.
mod sqlstate {
    pub const UNIQUE_VIOLATION: &str = "23505";
    pub const CHECK_VIOLATION: &str = "23514";
    pub const FOREIGN_KEY_VIOLATION: &str = "23503";
    pub const EXCLUSION_VIOLATION: &str = "23P01";
    pub const LOCK_NOT_AVAILABLE: &str = "55P03";
    pub const DEADLOCK_DETECTED: &str = "40P01";
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Core(core) if core.is_retryable())
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        let Some(db_err) = err.as_database_error() else {
            return ServiceError::Database(err);
        };
        let code = db_err.code().map(|c| c.into_owned());
        let constraint = db_err.constraint().unwrap_or("unknown").to_string();

        let core = match code.as_deref() {
            Some(sqlstate::EXCLUSION_VIOLATION) => CoreError::Conflict(
                "Time off overlaps an existing entry for this technician".into(),
            ),
            Some(sqlstate::UNIQUE_VIOLATION) => {
                CoreError::Conflict(format!("Duplicate value violates {constraint}"))
            }
            Some(sqlstate::CHECK_VIOLATION) => {
                CoreError::Validation(format!("Value violates {constraint}"))
            }
            Some(sqlstate::FOREIGN_KEY_VIOLATION) => {
                CoreError::Validation(format!("Referenced row does not exist ({constraint})"))
            }
            Some(sqlstate::LOCK_NOT_AVAILABLE) => {
                CoreError::Contention("Timed out waiting for a row lock".into())
            }
            Some(sqlstate::DEADLOCK_DETECTED) => {
                CoreError::Contention("Transaction aborted by deadlock detection".into())
            }
            _ => return ServiceError::Database(err),
        };
        ServiceError::Core(core)
    }
}

impl From<LeaseError> for ServiceError {
    fn from(err: LeaseError) -> Self {
        match err {
            LeaseError::Timeout { entity, id } => {
                ServiceError::Core(CoreError::LeaseTimeout { entity, id })
            }
            LeaseError::OrderViolation { requested, held } => {
                tracing::error!(requested, held, "Lock order violation");
                ServiceError::Core(CoreError::Internal(format!(
                    "lock order violation: {requested} lease requested after {held} lease"
                )))
            }
            LeaseError::Database(e) => ServiceError::from(e),
        }
    }
}

/// Convert a rule violation message into a validation error.
pub(crate) fn validation(message: String) -> ServiceError {
    ServiceError::Core(CoreError::Validation(message))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn lease_timeout_is_retryable() {
        let err = ServiceError::from(LeaseError::Timeout { entity: "job", id: 3 });
        assert!(err.is_retryable());
        assert_matches!(err, ServiceError::Core(CoreError::LeaseTimeout { entity: "job", id: 3 }));
    }

    #[test]
    fn order_violation_is_internal() {
        let err = ServiceError::from(LeaseError::OrderViolation {
            requested: "job",
            held: "technician",
        });
        assert!(!err.is_retryable());
        assert_matches!(err, ServiceError::Core(CoreError::Internal(ref m)) if m.contains("lock order"));
    }

    #[test]
    fn non_database_errors_pass_through() {
        let err = ServiceError::from(sqlx::Error::RowNotFound);
        assert_matches!(err, ServiceError::Database(sqlx::Error::RowNotFound));
    }
}
