pub mod admin;
pub mod health;
pub mod self_service;
pub mod technicians;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /technicians/{id}/availability                       summary (any role)
/// /technicians/{id}/schedule                           weekly schedule (any role)
/// /technicians/{id}/readiness/{job_id}                 readiness breakdown
/// /technicians/{id}/jobs/{job_id}/accept               accept (POST)
/// /technicians/{id}/jobs/{job_id}/reject               reject (POST)
///
/// /admin/technicians/{id}/schedule                     replace week (PUT)
/// /admin/technicians/{id}/availability                 partial update (PATCH)
/// /admin/technicians/{id}/time-off                     list, create
/// /admin/technicians/{id}/time-off/{time_off_id}       cancel (DELETE)
///
/// /technician/availability                             go online/offline (PATCH)
/// /technician/time-off                                 list upcoming, create
/// /technician/time-off/{time_off_id}                   cancel (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/technicians", technicians::router())
        .nest("/admin/technicians", admin::router())
        .nest("/technician", self_service::router())
}
