use dispatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `job_rejections` ledger.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobRejection {
    pub job_id: DbId,
    pub tech_id: DbId,
    pub reason: Option<String>,
    pub rejected_at: Timestamp,
}
