//! Audit action and entity-type constants.
//!
//! Every core mutation writes exactly one audit row inside its own
//! transaction using one of these action names.

use crate::roles::ActorRole;

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

pub mod actions {
    pub const TECHNICIAN_TIME_OFF_CREATED: &str = "technician.time_off.created";
    pub const TECHNICIAN_TIME_OFF_CANCELLED: &str = "technician.time_off.cancelled";
    pub const TECHNICIAN_AVAILABILITY_UPDATED: &str = "technician.availability_updated";

    pub const ADMIN_TIME_OFF_CREATED: &str = "admin.technician.time_off_created";
    pub const ADMIN_TIME_OFF_CANCELLED: &str = "admin.technician.time_off_cancelled";
    pub const ADMIN_WEEKLY_SCHEDULE_UPDATED: &str = "admin.technician.weekly_schedule_updated";
    pub const ADMIN_AVAILABILITY_UPDATED: &str = "admin.technician.availability_updated";

    pub const JOB_ACCEPTED: &str = "job.accepted";
    pub const JOB_REJECTED: &str = "job.rejected";
}

// ---------------------------------------------------------------------------
// Entity types
// ---------------------------------------------------------------------------

pub mod entity_types {
    pub const TECHNICIAN: &str = "technician";
    pub const TECHNICIAN_SCHEDULE: &str = "technician_schedule";
    pub const TECHNICIAN_TIME_OFF: &str = "technician_time_off";
    pub const JOB: &str = "job";
}

/// Action name for a time-off creation, by who performed it.
pub fn time_off_created_action(role: ActorRole) -> &'static str {
    match role {
        ActorRole::Admin => actions::ADMIN_TIME_OFF_CREATED,
        ActorRole::Technician => actions::TECHNICIAN_TIME_OFF_CREATED,
    }
}

pub fn time_off_cancelled_action(role: ActorRole) -> &'static str {
    match role {
        ActorRole::Admin => actions::ADMIN_TIME_OFF_CANCELLED,
        ActorRole::Technician => actions::TECHNICIAN_TIME_OFF_CANCELLED,
    }
}

pub fn availability_updated_action(role: ActorRole) -> &'static str {
    match role {
        ActorRole::Admin => actions::ADMIN_AVAILABILITY_UPDATED,
        ActorRole::Technician => actions::TECHNICIAN_AVAILABILITY_UPDATED,
    }
}
