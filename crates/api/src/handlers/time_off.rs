//! Handlers for time off, both administrative and self-service.
//!
//! Self-service routes always act on the caller's own technician record.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use dispatch_assignment::CreateTimeOffRequest;
use dispatch_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireTechnician};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Administrative
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/technicians/{id}/time-off
///
/// Every non-cancelled entry, past ones included.
pub async fn admin_list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(technician_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entries = state.services.time_off.list_active(technician_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/admin/technicians/{id}/time-off
pub async fn admin_create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(technician_id): Path<DbId>,
    Json(input): Json<CreateTimeOffRequest>,
) -> AppResult<impl IntoResponse> {
    let entry = state
        .services
        .time_off
        .create(admin.actor(), technician_id, &input, Utc::now().date_naive())
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// DELETE /api/v1/admin/technicians/{id}/time-off/{time_off_id}
pub async fn admin_cancel(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((technician_id, time_off_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let entry = state
        .services
        .time_off
        .cancel(admin.actor(), technician_id, time_off_id, Utc::now())
        .await?;
    Ok(Json(DataResponse { data: entry }))
}

// ---------------------------------------------------------------------------
// Self-service
// ---------------------------------------------------------------------------

/// GET /api/v1/technician/time-off
///
/// Entries that have not ended yet.
pub async fn self_list(
    RequireTechnician(user): RequireTechnician,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let entries = state
        .services
        .time_off
        .list_upcoming(user.user_id, Utc::now().date_naive())
        .await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/technician/time-off
pub async fn self_create(
    RequireTechnician(user): RequireTechnician,
    State(state): State<AppState>,
    Json(input): Json<CreateTimeOffRequest>,
) -> AppResult<impl IntoResponse> {
    let entry = state
        .services
        .time_off
        .create(user.actor(), user.user_id, &input, Utc::now().date_naive())
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// DELETE /api/v1/technician/time-off/{time_off_id}
pub async fn self_cancel(
    RequireTechnician(user): RequireTechnician,
    State(state): State<AppState>,
    Path(time_off_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = state
        .services
        .time_off
        .cancel(user.actor(), user.user_id, time_off_id, Utc::now())
        .await?;
    Ok(Json(DataResponse { data: entry }))
}
