//! Job row model.
//!
//! Jobs are created and progressed upstream. This workspace only moves a
//! job from `READY_FOR_TECH_ACCEPTANCE` to `ASSIGNED`.

use dispatch_core::assignment::JobStatus;
use dispatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `jobs` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Job {
    pub id: DbId,
    pub job_code: String,
    pub status: String,
    pub assigned_tech_id: Option<DbId>,
    pub zone_id: Option<DbId>,
    pub skill_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Job {
    pub fn status(&self) -> Result<JobStatus, String> {
        JobStatus::from_str_value(&self.status)
    }
}

/// Input for inserting a job, used by provisioning and fixtures.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJob {
    pub job_code: String,
    pub status: JobStatus,
    pub zone_id: Option<DbId>,
    pub skill_id: Option<DbId>,
    pub assigned_tech_id: Option<DbId>,
}
