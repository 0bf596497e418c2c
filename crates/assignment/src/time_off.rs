//! Time-off ledger: creation, soft cancellation, listings.
//!
//! Mutations lease the technician row so that the overlap check and the
//! insert are serialized per technician. The schema's exclusion constraint
//! backs the same rule for any writer that bypasses this path.

use std::sync::Arc;
use std::time::Duration;

use dispatch_core::audit::{entity_types, time_off_cancelled_action, time_off_created_action};
use dispatch_core::error::CoreError;
use dispatch_core::roles::Actor;
use dispatch_core::time_off::{
    normalize_reason, resolve_entry_type, validate_cancellable, validate_date_range,
    validate_not_backdated, TimeOffEntryType, TimeOffPolicy,
};
use dispatch_core::types::{Date, DbId, Timestamp};
use dispatch_db::models::audit::CreateAuditLog;
use dispatch_db::models::time_off::{CreateTimeOff, TimeOff};
use dispatch_db::repositories::{AuditLogRepo, TimeOffRepo};
use dispatch_db::{DbPool, UnitOfWork};
use dispatch_events::{event_types, DomainEvent, EventBus};
use serde::Deserialize;

use crate::availability::find_technician;
use crate::error::{validation, ServiceResult};

/// A time-off request as submitted by a caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeOffRequest {
    pub entry_type: Option<TimeOffEntryType>,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: String,
}

#[derive(Clone)]
pub struct TimeOffLedger {
    pool: DbPool,
    lock_timeout: Duration,
    event_bus: Arc<EventBus>,
}

impl TimeOffLedger {
    pub fn new(pool: DbPool, lock_timeout: Duration, event_bus: Arc<EventBus>) -> Self {
        Self {
            pool,
            lock_timeout,
            event_bus,
        }
    }

    /// Create a time-off entry. The rule set follows the actor's role.
    pub async fn create(
        &self,
        actor: Actor,
        technician_id: DbId,
        request: &CreateTimeOffRequest,
        today: Date,
    ) -> ServiceResult<TimeOff> {
        let policy = TimeOffPolicy::from(actor.role);
        validate_date_range(request.start_date, request.end_date).map_err(validation)?;
        validate_not_backdated(request.start_date, today).map_err(validation)?;
        let entry_type =
            resolve_entry_type(policy, request.entry_type, request.start_date, request.end_date)
                .map_err(validation)?;
        let reason = normalize_reason(&request.reason).map_err(validation)?;

        let input = CreateTimeOff {
            entry_type,
            start_date: request.start_date,
            end_date: request.end_date,
            reason,
        };

        let mut uow = UnitOfWork::begin(&self.pool, self.lock_timeout).await?;
        uow.lease_technician(technician_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "technician",
                id: technician_id,
            })?;

        if let Some(existing) =
            TimeOffRepo::find_overlapping(uow.conn(), technician_id, input.start_date, input.end_date)
                .await?
        {
            return Err(CoreError::Conflict(format!(
                "Time off overlaps existing entry {} ({} to {})",
                existing.id, existing.start_date, existing.end_date
            ))
            .into());
        }

        let entry = TimeOffRepo::create(uow.conn(), technician_id, &input).await?;

        let details = serde_json::json!({
            "technician_id": technician_id,
            "entry_type": entry.entry_type,
            "start_date": entry.start_date.to_string(),
            "end_date": entry.end_date.to_string(),
            "reason": entry.reason,
        });
        AuditLogRepo::create(
            uow.conn(),
            &CreateAuditLog::new(
                actor,
                time_off_created_action(actor.role),
                entity_types::TECHNICIAN_TIME_OFF,
                entry.id,
            )
            .with_metadata(details.clone()),
        )
        .await?;

        uow.commit().await?;

        tracing::info!(
            technician_id,
            time_off_id = entry.id,
            entry_type = %entry.entry_type,
            start_date = %entry.start_date,
            end_date = %entry.end_date,
            actor_role = %actor.role,
            "Time off created"
        );

        self.event_bus.publish(
            DomainEvent::new(event_types::TIME_OFF_CREATED)
                .with_source(entity_types::TECHNICIAN_TIME_OFF, entry.id)
                .with_actor(actor)
                .with_payload(details),
        );

        Ok(entry)
    }

    /// Soft-cancel an entry. Missing and already-cancelled entries are
    /// both reported as not found.
    pub async fn cancel(
        &self,
        actor: Actor,
        technician_id: DbId,
        time_off_id: DbId,
        now: Timestamp,
    ) -> ServiceResult<TimeOff> {
        let policy = TimeOffPolicy::from(actor.role);
        let not_found = || CoreError::NotFound {
            entity: "time_off",
            id: time_off_id,
        };

        let mut uow = UnitOfWork::begin(&self.pool, self.lock_timeout).await?;
        uow.lease_technician(technician_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "technician",
                id: technician_id,
            })?;

        let entry = TimeOffRepo::find_for_technician(uow.conn(), technician_id, time_off_id)
            .await?
            .filter(|entry| !entry.is_cancelled())
            .ok_or_else(not_found)?;

        validate_cancellable(policy, entry.start_date, entry.end_date, now.date_naive())
            .map_err(validation)?;

        let cancelled = TimeOffRepo::cancel(uow.conn(), time_off_id, now)
            .await?
            .ok_or_else(not_found)?;

        let details = serde_json::json!({
            "technician_id": technician_id,
            "start_date": cancelled.start_date.to_string(),
            "end_date": cancelled.end_date.to_string(),
        });
        AuditLogRepo::create(
            uow.conn(),
            &CreateAuditLog::new(
                actor,
                time_off_cancelled_action(actor.role),
                entity_types::TECHNICIAN_TIME_OFF,
                time_off_id,
            )
            .with_metadata(details.clone()),
        )
        .await?;

        uow.commit().await?;

        tracing::info!(
            technician_id,
            time_off_id,
            actor_role = %actor.role,
            "Time off cancelled"
        );

        self.event_bus.publish(
            DomainEvent::new(event_types::TIME_OFF_CANCELLED)
                .with_source(entity_types::TECHNICIAN_TIME_OFF, time_off_id)
                .with_actor(actor)
                .with_payload(details),
        );

        Ok(cancelled)
    }

    /// All non-cancelled entries for a technician.
    pub async fn list_active(&self, technician_id: DbId) -> ServiceResult<Vec<TimeOff>> {
        let mut conn = self.pool.acquire().await?;
        find_technician(&mut conn, technician_id).await?;
        Ok(TimeOffRepo::list_active(&mut *conn, technician_id).await?)
    }

    /// Non-cancelled entries that have not ended before `today`.
    pub async fn list_upcoming(&self, technician_id: DbId, today: Date) -> ServiceResult<Vec<TimeOff>> {
        let mut conn = self.pool.acquire().await?;
        find_technician(&mut conn, technician_id).await?;
        Ok(TimeOffRepo::list_active_from(&mut *conn, technician_id, today).await?)
    }
}
