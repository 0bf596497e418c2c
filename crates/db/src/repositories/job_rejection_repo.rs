//! Repository for the `job_rejections` ledger.

use dispatch_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::job_rejection::JobRejection;

const COLUMNS: &str = "job_id, tech_id, reason, rejected_at";

/// Append-only ledger of declined job offers.
pub struct JobRejectionRepo;

impl JobRejectionRepo {
    /// Record a rejection. A repeated pair fails with a unique violation.
    pub async fn create<'e, E>(
        executor: E,
        job_id: DbId,
        technician_id: DbId,
        reason: Option<&str>,
    ) -> Result<JobRejection, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO job_rejections (job_id, tech_id, reason)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobRejection>(&query)
            .bind(job_id)
            .bind(technician_id)
            .bind(reason)
            .fetch_one(executor)
            .await
    }

    pub async fn exists<'e, E>(executor: E, job_id: DbId, technician_id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM job_rejections WHERE job_id = $1 AND tech_id = $2)",
        )
        .bind(job_id)
        .bind(technician_id)
        .fetch_one(executor)
        .await
    }

    pub async fn list_for_job<'e, E>(executor: E, job_id: DbId) -> Result<Vec<JobRejection>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM job_rejections WHERE job_id = $1 ORDER BY rejected_at"
        );
        sqlx::query_as::<_, JobRejection>(&query)
            .bind(job_id)
            .fetch_all(executor)
            .await
    }
}
