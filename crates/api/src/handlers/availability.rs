//! Handlers for availability reads and the availability toggles.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use dispatch_core::types::DbId;
use dispatch_db::models::technician::UpdateTechnicianAvailability;
use serde::Deserialize;

use super::AtQuery;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireTechnician};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of the self-service toggle. Capacity and status are admin-only,
/// so any other field is rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelfAvailabilityUpdate {
    pub manual_availability: bool,
}

/// GET /api/v1/technicians/{id}/availability
pub async fn get_availability(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(technician_id): Path<DbId>,
    Query(query): Query<AtQuery>,
) -> AppResult<impl IntoResponse> {
    let view = state
        .services
        .availability
        .summary(technician_id, query.instant())
        .await?;
    Ok(Json(DataResponse { data: view }))
}

/// PATCH /api/v1/admin/technicians/{id}/availability
pub async fn admin_update_availability(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(technician_id): Path<DbId>,
    Json(input): Json<UpdateTechnicianAvailability>,
) -> AppResult<impl IntoResponse> {
    let technician = state
        .services
        .availability
        .update(admin.actor(), technician_id, &input)
        .await?;
    Ok(Json(DataResponse { data: technician }))
}

/// PATCH /api/v1/technician/availability
///
/// Go online or offline. Returns the refreshed availability summary.
pub async fn self_update_availability(
    RequireTechnician(user): RequireTechnician,
    State(state): State<AppState>,
    Json(input): Json<SelfAvailabilityUpdate>,
) -> AppResult<impl IntoResponse> {
    let availability = &state.services.availability;
    availability
        .update(
            user.actor(),
            user.user_id,
            &UpdateTechnicianAvailability {
                manual_availability: Some(input.manual_availability),
                ..Default::default()
            },
        )
        .await?;

    let view = availability.summary(user.user_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: view }))
}
