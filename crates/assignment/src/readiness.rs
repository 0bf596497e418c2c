//! Readiness evaluation: availability plus zone and skill coverage.

use dispatch_core::error::CoreError;
use dispatch_core::readiness::{assert_can_assign, AssignmentReadiness};
use dispatch_core::types::{DbId, Timestamp};
use dispatch_db::models::job::Job;
use dispatch_db::models::technician::Technician;
use dispatch_db::repositories::{CoverageRepo, JobRepo};
use dispatch_db::DbPool;
use sqlx::PgConnection;

use crate::availability::{find_technician, load_snapshot};
use crate::error::ServiceResult;

/// Evaluate readiness for rows already loaded on `conn`.
///
/// Inside an acceptance transaction both rows are leased, so the verdict
/// holds until commit.
pub(crate) async fn evaluate(
    conn: &mut PgConnection,
    technician: &Technician,
    job: &Job,
    now: Timestamp,
) -> ServiceResult<AssignmentReadiness> {
    let snapshot = load_snapshot(&mut *conn, technician, now.date_naive()).await?;
    let zone_ids = CoverageRepo::zone_ids_for(&mut *conn, technician.id).await?;
    let skill_ids = CoverageRepo::skill_ids_for(&mut *conn, technician.id).await?;

    Ok(AssignmentReadiness::evaluate(
        technician.id,
        job.id,
        snapshot.effective_availability(now),
        job.zone_id,
        job.skill_id,
        &zone_ids,
        &skill_ids,
    ))
}

/// Lock-free readiness checks for display and pre-flight.
#[derive(Clone)]
pub struct ReadinessEvaluator {
    pool: DbPool,
}

impl ReadinessEvaluator {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn readiness(
        &self,
        technician_id: DbId,
        job_id: DbId,
        now: Timestamp,
    ) -> ServiceResult<AssignmentReadiness> {
        let mut conn = self.pool.acquire().await?;
        let technician = find_technician(&mut conn, technician_id).await?;
        let job = JobRepo::find_by_id(&mut *conn, job_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "job",
                id: job_id,
            })?;
        evaluate(&mut conn, &technician, &job, now).await
    }

    /// Like [`Self::readiness`] but fails with the breakdown when the
    /// technician cannot be assigned.
    pub async fn assert_can_assign(
        &self,
        technician_id: DbId,
        job_id: DbId,
        now: Timestamp,
    ) -> ServiceResult<AssignmentReadiness> {
        let readiness = self.readiness(technician_id, job_id, now).await?;
        Ok(assert_can_assign(readiness)?)
    }
}
