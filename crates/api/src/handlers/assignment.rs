//! Handlers for readiness, job acceptance, and job rejection.
//!
//! Technicians act only for themselves; admins may act for anyone.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use dispatch_core::error::CoreError;
use dispatch_core::types::DbId;
use serde::Deserialize;
use validator::Validate;

use super::AtQuery;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::ensure_self_or_admin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct RejectJobRequest {
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
}

/// GET /api/v1/technicians/{id}/readiness/{job_id}
pub async fn get_readiness(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((technician_id, job_id)): Path<(DbId, DbId)>,
    Query(query): Query<AtQuery>,
) -> AppResult<impl IntoResponse> {
    ensure_self_or_admin(&auth, technician_id)?;
    let readiness = state
        .services
        .readiness
        .readiness(technician_id, job_id, query.instant())
        .await?;
    Ok(Json(DataResponse { data: readiness }))
}

/// POST /api/v1/technicians/{id}/jobs/{job_id}/accept
///
/// Returns the assigned job. Replaying a successful accept fails with 409
/// `INVALID_STATE`; `LEASE_TIMEOUT` responses are safe to retry.
pub async fn accept_job(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((technician_id, job_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_self_or_admin(&auth, technician_id)?;
    let job = state
        .services
        .coordinator
        .accept(auth.actor(), technician_id, job_id, Utc::now())
        .await?;
    Ok(Json(DataResponse { data: job }))
}

/// POST /api/v1/technicians/{id}/jobs/{job_id}/reject
///
/// The body is optional; an absent or blank reason is stored as null.
pub async fn reject_job(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((technician_id, job_id)): Path<(DbId, DbId)>,
    body: Option<Json<RejectJobRequest>>,
) -> AppResult<impl IntoResponse> {
    ensure_self_or_admin(&auth, technician_id)?;
    let input = body.map(|Json(b)| b).unwrap_or_default();
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let rejection = state
        .services
        .rejections
        .reject(auth.actor(), technician_id, job_id, input.reason.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: rejection })))
}
