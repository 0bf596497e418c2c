//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly and need no server or database.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use dispatch_api::error::AppError;
use dispatch_assignment::ServiceError;
use dispatch_core::error::CoreError;
use dispatch_core::readiness::AssignmentReadiness;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let (status, json) = error_to_response(AppError::Core(CoreError::NotFound {
        entity: "technician",
        id: 42,
    }))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "technician with id 42 not found");
    assert!(json.get("retryable").is_none());
}

#[tokio::test]
async fn validation_error_returns_422() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Validation("reason must not be empty".into())))
            .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "reason must not be empty");
}

#[tokio::test]
async fn invalid_state_carries_observed_status() {
    let (status, json) = error_to_response(AppError::Core(CoreError::InvalidState {
        entity: "job",
        id: 7,
        status: "ASSIGNED".into(),
        expected: "READY_FOR_TECH_ACCEPTANCE",
    }))
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "INVALID_STATE");
    assert_eq!(json["details"]["status"], "ASSIGNED");
    assert_eq!(json["details"]["id"], 7);
}

#[tokio::test]
async fn not_eligible_carries_breakdown() {
    let readiness = AssignmentReadiness::evaluate(3, 9, true, Some(1), Some(2), &[1], &[5]);
    let (status, json) = error_to_response(AppError::Core(CoreError::NotEligible {
        readiness,
        previously_rejected: false,
    }))
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "NOT_ELIGIBLE");
    assert_eq!(json["details"]["readiness"]["zone_match"], true);
    assert_eq!(json["details"]["readiness"]["skill_match"], false);
    assert_eq!(json["details"]["failed_checks"], serde_json::json!(["skill_match"]));
    assert_eq!(json["details"]["previously_rejected"], false);
}

#[tokio::test]
async fn capacity_exceeded_returns_409() {
    let (status, json) = error_to_response(AppError::Core(CoreError::CapacityExceeded {
        technician_id: 3,
        active_jobs: 2,
        max_active_jobs: 2,
    }))
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CAPACITY_EXCEEDED");
    assert_eq!(json["details"]["max_active_jobs"], 2);
}

#[tokio::test]
async fn lock_errors_are_retryable_conflicts() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::LeaseTimeout { entity: "job", id: 5 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "LEASE_TIMEOUT");
    assert_eq!(json["retryable"], true);

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Contention("deadlock".into()))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONTENTION");
    assert_eq!(json["retryable"], true);
}

#[tokio::test]
async fn plain_conflict_is_not_retryable() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Conflict("duplicate".into()))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert!(json.get("retryable").is_none());
}

#[tokio::test]
async fn auth_errors_map_to_401_and_403() {
    let (status, _) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("nope".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let (status, json) =
        error_to_response(AppError::InternalError("secret connection string".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");

    let (status, json) = error_to_response(AppError::from(ServiceError::Database(
        sqlx::Error::PoolTimedOut,
    )))
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn service_errors_unwrap_to_domain_errors() {
    let (status, json) = error_to_response(AppError::from(ServiceError::Core(
        CoreError::NotFound { entity: "job", id: 1 },
    )))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
