//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not match with 403 Forbidden.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use dispatch_core::error::CoreError;
use dispatch_core::roles::ActorRole;
use dispatch_core::types::DbId;

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Requires the `admin` role.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ActorRole::Admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires the `technician` role. Used by the self-service routes, which
/// always act on the caller's own record.
pub struct RequireTechnician(pub AuthUser);

impl FromRequestParts<AppState> for RequireTechnician {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ActorRole::Technician {
            return Err(AppError::Core(CoreError::Forbidden(
                "Technician role required".into(),
            )));
        }
        Ok(RequireTechnician(user))
    }
}

/// Technicians may only act on their own record; admins on any.
pub fn ensure_self_or_admin(user: &AuthUser, technician_id: DbId) -> AppResult<()> {
    match user.role {
        ActorRole::Admin => Ok(()),
        ActorRole::Technician if user.user_id == technician_id => Ok(()),
        ActorRole::Technician => Err(AppError::Core(CoreError::Forbidden(
            "Technicians may only act on their own record".into(),
        ))),
    }
}
