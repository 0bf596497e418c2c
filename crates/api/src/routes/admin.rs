//! Routes mounted at `/admin/technicians`. Admin role required.

use axum::routing::{delete, get, patch, put};
use axum::Router;

use crate::handlers::{availability, schedule, time_off};
use crate::state::AppState;

/// ```text
/// PUT    /{id}/schedule                    -> replace_schedule
/// PATCH  /{id}/availability                -> admin_update_availability
/// GET    /{id}/time-off                    -> admin_list
/// POST   /{id}/time-off                    -> admin_create
/// DELETE /{id}/time-off/{time_off_id}      -> admin_cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/schedule", put(schedule::replace_schedule))
        .route(
            "/{id}/availability",
            patch(availability::admin_update_availability),
        )
        .route(
            "/{id}/time-off",
            get(time_off::admin_list).post(time_off::admin_create),
        )
        .route(
            "/{id}/time-off/{time_off_id}",
            delete(time_off::admin_cancel),
        )
}
