//! Routes mounted at `/technicians`. All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{assignment, availability, schedule};
use crate::state::AppState;

/// ```text
/// GET    /{id}/availability                -> get_availability
/// GET    /{id}/schedule                    -> get_schedule
/// GET    /{id}/readiness/{job_id}          -> get_readiness
/// POST   /{id}/jobs/{job_id}/accept        -> accept_job
/// POST   /{id}/jobs/{job_id}/reject        -> reject_job
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/availability", get(availability::get_availability))
        .route("/{id}/schedule", get(schedule::get_schedule))
        .route("/{id}/readiness/{job_id}", get(assignment::get_readiness))
        .route("/{id}/jobs/{job_id}/accept", post(assignment::accept_job))
        .route("/{id}/jobs/{job_id}/reject", post(assignment::reject_job))
}
