//! Job acceptance under ordered leases.
//!
//! `accept` runs as one transaction:
//!
//! 1. lease the job, require `READY_FOR_TECH_ACCEPTANCE`;
//! 2. lease the technician (always after the job), require `active`;
//! 3. re-evaluate readiness and the rejection ledger under both leases;
//! 4. count active jobs against `max_active_jobs`;
//! 5. assign, audit, commit.
//!
//! The job lease serializes competing accepts for one job; the loser
//! re-reads the committed status and fails with `InvalidState`. The
//! technician lease serializes accepts across jobs for one technician so
//! the capacity count cannot race.

use std::sync::Arc;
use std::time::Duration;

use dispatch_core::assignment::{check_capacity, require_offerable};
use dispatch_core::audit::{actions, entity_types};
use dispatch_core::error::CoreError;
use dispatch_core::readiness::assert_eligible_for_acceptance;
use dispatch_core::roles::Actor;
use dispatch_core::technician::TechnicianStatus;
use dispatch_core::types::{DbId, Timestamp};
use dispatch_db::models::audit::CreateAuditLog;
use dispatch_db::models::job::Job;
use dispatch_db::repositories::{AuditLogRepo, JobRejectionRepo, JobRepo};
use dispatch_db::{DbPool, UnitOfWork};
use dispatch_events::{event_types, DomainEvent, EventBus};

use crate::error::ServiceResult;
use crate::readiness::evaluate;

#[derive(Clone)]
pub struct AssignmentCoordinator {
    pool: DbPool,
    lock_timeout: Duration,
    event_bus: Arc<EventBus>,
}

impl AssignmentCoordinator {
    pub fn new(pool: DbPool, lock_timeout: Duration, event_bus: Arc<EventBus>) -> Self {
        Self {
            pool,
            lock_timeout,
            event_bus,
        }
    }

    /// Accept an offered job on behalf of a technician.
    ///
    /// Not idempotent: replaying a successful accept fails with
    /// `InvalidState` because the job is no longer on offer.
    pub async fn accept(
        &self,
        actor: Actor,
        technician_id: DbId,
        job_id: DbId,
        now: Timestamp,
    ) -> ServiceResult<Job> {
        match self.accept_in_unit(actor, technician_id, job_id, now).await {
            Ok(job) => {
                tracing::info!(
                    technician_id,
                    job_id,
                    actor_role = %actor.role,
                    actor_id = actor.id,
                    "Job accepted"
                );
                self.event_bus.publish(
                    DomainEvent::new(event_types::JOB_ACCEPTED)
                        .with_source(entity_types::JOB, job_id)
                        .with_actor(actor)
                        .with_payload(serde_json::json!({ "technician_id": technician_id })),
                );
                Ok(job)
            }
            Err(e) => {
                tracing::info!(technician_id, job_id, error = %e, "Job acceptance refused");
                Err(e)
            }
        }
    }

    async fn accept_in_unit(
        &self,
        actor: Actor,
        technician_id: DbId,
        job_id: DbId,
        now: Timestamp,
    ) -> ServiceResult<Job> {
        let mut uow = UnitOfWork::begin(&self.pool, self.lock_timeout).await?;

        let job = uow.lease_job(job_id).await?.ok_or(CoreError::NotFound {
            entity: "job",
            id: job_id,
        })?;
        require_offerable(job.id, &job.status)?;

        let technician = uow
            .lease_technician(technician_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "technician",
                id: technician_id,
            })?;
        if !technician.is_active() {
            return Err(CoreError::InvalidState {
                entity: "technician",
                id: technician_id,
                status: technician.status.clone(),
                expected: TechnicianStatus::Active.as_str(),
            }
            .into());
        }

        let readiness = evaluate(uow.conn(), &technician, &job, now).await?;
        let previously_rejected = JobRejectionRepo::exists(uow.conn(), job_id, technician_id).await?;
        let readiness = assert_eligible_for_acceptance(readiness, previously_rejected)?;

        let active_jobs = JobRepo::count_active_for_technician(uow.conn(), technician_id).await?;
        check_capacity(technician_id, active_jobs, technician.max_active_jobs)?;

        let assigned = JobRepo::assign(uow.conn(), job_id, technician_id).await?;

        AuditLogRepo::create(
            uow.conn(),
            &CreateAuditLog::new(actor, actions::JOB_ACCEPTED, entity_types::JOB, job_id)
                .with_metadata(serde_json::json!({
                    "technician_id": technician_id,
                    "previous_status": job.status,
                    "new_status": assigned.status,
                    "active_jobs_before": active_jobs,
                    "max_active_jobs": technician.max_active_jobs,
                    "readiness": readiness,
                })),
        )
        .await?;

        uow.commit().await?;
        Ok(assigned)
    }
}
