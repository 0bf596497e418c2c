//! Routes mounted at `/technician`, acting on the caller's own record.

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::{availability, time_off};
use crate::state::AppState;

/// ```text
/// PATCH  /availability                     -> self_update_availability
/// GET    /time-off                         -> self_list
/// POST   /time-off                         -> self_create
/// DELETE /time-off/{time_off_id}           -> self_cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/availability",
            patch(availability::self_update_availability),
        )
        .route(
            "/time-off",
            get(time_off::self_list).post(time_off::self_create),
        )
        .route("/time-off/{time_off_id}", delete(time_off::self_cancel))
}
