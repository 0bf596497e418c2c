use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use dispatch_core::schedule::WeeklyScheduleEntryInput;
use dispatch_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/technicians/{id}/schedule
///
/// Always seven slots, Monday first.
pub async fn get_schedule(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(technician_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let slots = state.services.schedule.get(technician_id).await?;
    Ok(Json(DataResponse { data: slots }))
}

/// PUT /api/v1/admin/technicians/{id}/schedule
pub async fn replace_schedule(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(technician_id): Path<DbId>,
    Json(entries): Json<Vec<WeeklyScheduleEntryInput>>,
) -> AppResult<impl IntoResponse> {
    let slots = state
        .services
        .schedule
        .replace(admin.actor(), technician_id, &entries)
        .await?;
    Ok(Json(DataResponse { data: slots }))
}
