//! Repository for the `jobs` table.

use dispatch_core::assignment::{active_status_literals, JobStatus};
use dispatch_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::job::{CreateJob, Job};

/// Column list for job queries.
const COLUMNS: &str = "id, job_code, status, assigned_tech_id, zone_id, skill_id, \
    created_at, updated_at";

/// Provides job lookups, locking, and the acceptance transition.
pub struct JobRepo;

impl JobRepo {
    pub async fn create<'e, E>(executor: E, input: &CreateJob) -> Result<Job, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO jobs (job_code, status, zone_id, skill_id, assigned_tech_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(&input.job_code)
            .bind(input.status.as_str())
            .bind(input.zone_id)
            .bind(input.skill_id)
            .bind(input.assigned_tech_id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Job>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Fetch and lock a job row until the surrounding transaction ends.
    pub async fn lock_for_update<'e, E>(executor: E, id: DbId) -> Result<Option<Job>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Count jobs occupying one of the technician's capacity slots.
    pub async fn count_active_for_technician<'e, E>(
        executor: E,
        technician_id: DbId,
    ) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM jobs
             WHERE assigned_tech_id = $1 AND status = ANY($2)",
        )
        .bind(technician_id)
        .bind(active_status_literals())
        .fetch_one(executor)
        .await
    }

    /// Assign the job to a technician and mark it `ASSIGNED`.
    pub async fn assign<'e, E>(executor: E, job_id: DbId, technician_id: DbId) -> Result<Job, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE jobs SET assigned_tech_id = $2, status = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(job_id)
            .bind(technician_id)
            .bind(JobStatus::Assigned.as_str())
            .fetch_one(executor)
            .await
    }

    /// Force a job into a status. Upstream job management owns every
    /// transition other than acceptance; this is for provisioning.
    pub async fn set_status<'e, E>(executor: E, job_id: DbId, status: JobStatus) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("UPDATE jobs SET status = $2 WHERE id = $1")
            .bind(job_id)
            .bind(status.as_str())
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
