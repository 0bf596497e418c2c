//! Append-only rejection ledger.
//!
//! A rejection never touches the job row. Each (job, technician) pair can
//! be recorded once; the primary key enforces it under concurrency.

use std::sync::Arc;
use std::time::Duration;

use dispatch_core::audit::{actions, entity_types};
use dispatch_core::error::CoreError;
use dispatch_core::roles::Actor;
use dispatch_core::types::DbId;
use dispatch_db::models::audit::CreateAuditLog;
use dispatch_db::models::job_rejection::JobRejection;
use dispatch_db::repositories::{AuditLogRepo, JobRejectionRepo, JobRepo};
use dispatch_db::{DbPool, UnitOfWork};
use dispatch_events::{event_types, DomainEvent, EventBus};

use crate::availability::find_technician;
use crate::error::{ServiceError, ServiceResult};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct RejectionLedger {
    pool: DbPool,
    lock_timeout: Duration,
    event_bus: Arc<EventBus>,
}

impl RejectionLedger {
    pub fn new(pool: DbPool, lock_timeout: Duration, event_bus: Arc<EventBus>) -> Self {
        Self {
            pool,
            lock_timeout,
            event_bus,
        }
    }

    /// Record that a technician declined a job, whatever the job's status.
    ///
    /// A repeated rejection fails with `Conflict`.
    pub async fn reject(
        &self,
        actor: Actor,
        technician_id: DbId,
        job_id: DbId,
        reason: Option<&str>,
    ) -> ServiceResult<JobRejection> {
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());

        let mut uow = UnitOfWork::begin(&self.pool, self.lock_timeout).await?;
        JobRepo::find_by_id(uow.conn(), job_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "job",
                id: job_id,
            })?;
        find_technician(uow.conn(), technician_id).await?;

        let rejection = JobRejectionRepo::create(uow.conn(), job_id, technician_id, reason)
            .await
            .map_err(|e| duplicate_as_conflict(e, technician_id, job_id))?;

        AuditLogRepo::create(
            uow.conn(),
            &CreateAuditLog::new(actor, actions::JOB_REJECTED, entity_types::JOB, job_id)
                .with_metadata(serde_json::json!({
                    "technician_id": technician_id,
                    "reason": reason,
                })),
        )
        .await?;

        uow.commit().await?;

        tracing::info!(technician_id, job_id, actor_id = actor.id, "Job rejected");
        self.event_bus.publish(
            DomainEvent::new(event_types::JOB_REJECTED)
                .with_source(entity_types::JOB, job_id)
                .with_actor(actor)
                .with_payload(serde_json::json!({ "technician_id": technician_id })),
        );

        Ok(rejection)
    }

    pub async fn has_rejected(&self, technician_id: DbId, job_id: DbId) -> ServiceResult<bool> {
        Ok(JobRejectionRepo::exists(&self.pool, job_id, technician_id).await?)
    }
}

fn duplicate_as_conflict(err: sqlx::Error, technician_id: DbId, job_id: DbId) -> ServiceError {
    let duplicate = err
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);
    if duplicate {
        CoreError::Conflict(format!(
            "Technician {technician_id} has already rejected job {job_id}"
        ))
        .into()
    } else {
        err.into()
    }
}
