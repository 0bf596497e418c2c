//! Caller roles and the authenticated actor recorded on audit events.
//!
//! Role literals must match the `audit_logs_actor_role_chk` constraint.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TECHNICIAN: &str = "technician";

define_literal_enum! {
    /// Role of an authenticated caller.
    ActorRole {
        Admin = "admin",
        Technician = "technician",
    }
}

/// The authenticated caller on whose behalf a mutation runs.
///
/// Supplied by the upstream authorization layer; this crate never
/// decides whether an actor is *allowed* to act, only records who did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub role: ActorRole,
    pub id: DbId,
}

impl Actor {
    pub fn admin(id: DbId) -> Self {
        Self {
            role: ActorRole::Admin,
            id,
        }
    }

    pub fn technician(id: DbId) -> Self {
        Self {
            role: ActorRole::Technician,
            id,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_literals_match_constants() {
        assert_eq!(ActorRole::Admin.as_str(), ROLE_ADMIN);
        assert_eq!(ActorRole::Technician.as_str(), ROLE_TECHNICIAN);
    }

    #[test]
    fn unknown_role_rejected() {
        let err = ActorRole::from_str_value("dispatcher").unwrap_err();
        assert!(err.contains("admin, technician"));
    }

    #[test]
    fn actor_constructors() {
        assert!(Actor::admin(1).is_admin());
        assert!(!Actor::technician(2).is_admin());
    }
}
