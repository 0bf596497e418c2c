//! Zone and skill rows a technician can be assigned to.

use dispatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `zones` or `skills`; both tables share this shape.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CoverageItem {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The zone and skill ids assigned to one technician.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TechnicianCoverage {
    pub zone_ids: Vec<DbId>,
    pub skill_ids: Vec<DbId>,
}
