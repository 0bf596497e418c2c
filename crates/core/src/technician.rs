//! Technician lifecycle status and capacity rules.

/// Default `max_active_jobs` for new technicians.
pub const DEFAULT_MAX_ACTIVE_JOBS: i32 = 2;

define_literal_enum! {
    /// Technician lifecycle status. Technicians are never deleted, only
    /// deactivated.
    TechnicianStatus {
        Active = "active",
        Deactivated = "deactivated",
    }
}

/// Validate a technician's concurrent-job capacity.
pub fn validate_max_active_jobs(max_active_jobs: i32) -> Result<(), String> {
    if max_active_jobs < 1 {
        return Err(format!(
            "max_active_jobs must be at least 1, got {max_active_jobs}"
        ));
    }
    Ok(())
}
