use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dispatch_assignment::ServiceError;
use dispatch_core::error::CoreError;
use serde_json::{json, Value};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A malformed request that never reached the domain layer.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(core) => AppError::Core(core),
            ServiceError::Database(db) => AppError::Database(db),
        }
    }
}

/// Status, machine code, message, and optional structured details.
struct ErrorParts {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<Value>,
}

impl ErrorParts {
    fn new(status: StatusCode, code: &'static str, message: String) -> Self {
        Self {
            status,
            code,
            message,
            details: None,
        }
    }

    fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred".to_string(),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let retryable = matches!(&self, AppError::Core(core) if core.is_retryable());

        let parts = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                ErrorParts::internal()
            }
            AppError::BadRequest(msg) => {
                ErrorParts::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ErrorParts::internal()
            }
        };

        let mut body = json!({
            "error": parts.message,
            "code": parts.code,
        });
        if let Some(details) = parts.details {
            body["details"] = details;
        }
        if retryable {
            body["retryable"] = Value::Bool(true);
        }

        (parts.status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(core: &CoreError) -> ErrorParts {
    match core {
        CoreError::NotFound { entity, id } => ErrorParts::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => ErrorParts::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "VALIDATION_ERROR",
            msg.clone(),
        ),
        CoreError::Conflict(msg) => ErrorParts::new(StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::InvalidState {
            entity,
            id,
            status,
            expected,
        } => ErrorParts::new(StatusCode::CONFLICT, "INVALID_STATE", core.to_string())
            .with_details(json!({
                "entity": entity,
                "id": id,
                "status": status,
                "expected": expected,
            })),
        CoreError::NotEligible {
            readiness,
            previously_rejected,
        } => ErrorParts::new(StatusCode::CONFLICT, "NOT_ELIGIBLE", core.to_string()).with_details(
            json!({
                "readiness": readiness,
                "failed_checks": readiness.failed_checks(),
                "previously_rejected": previously_rejected,
            }),
        ),
        CoreError::CapacityExceeded {
            technician_id,
            active_jobs,
            max_active_jobs,
        } => ErrorParts::new(StatusCode::CONFLICT, "CAPACITY_EXCEEDED", core.to_string())
            .with_details(json!({
                "technician_id": technician_id,
                "active_jobs": active_jobs,
                "max_active_jobs": max_active_jobs,
            })),
        CoreError::LeaseTimeout { entity, id } => {
            ErrorParts::new(StatusCode::CONFLICT, "LEASE_TIMEOUT", core.to_string())
                .with_details(json!({ "entity": entity, "id": id }))
        }
        CoreError::Contention(msg) => {
            ErrorParts::new(StatusCode::CONFLICT, "CONTENTION", msg.clone())
        }
        CoreError::Unauthorized(msg) => {
            ErrorParts::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
        }
        CoreError::Forbidden(msg) => ErrorParts::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            ErrorParts::internal()
        }
    }
}
