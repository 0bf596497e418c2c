//! Technician row model and availability update DTO.

use dispatch_core::technician::TechnicianStatus;
use dispatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `technicians` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Technician {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: String,
    pub manual_availability: bool,
    pub max_active_jobs: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Technician {
    pub fn status(&self) -> Result<TechnicianStatus, String> {
        TechnicianStatus::from_str_value(&self.status)
    }

    pub fn is_active(&self) -> bool {
        self.status() == Ok(TechnicianStatus::Active)
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a technician. Administrative CRUD lives upstream;
/// this exists for provisioning and fixtures.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTechnician {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub max_active_jobs: Option<i32>,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Partial update of the fields that drive availability and capacity.
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTechnicianAvailability {
    pub manual_availability: Option<bool>,
    pub max_active_jobs: Option<i32>,
    pub status: Option<TechnicianStatus>,
}

impl UpdateTechnicianAvailability {
    pub fn is_empty(&self) -> bool {
        self.manual_availability.is_none()
            && self.max_active_jobs.is_none()
            && self.status.is_none()
    }
}
