//! Availability reads and the manual availability toggle.
//!
//! Every verdict is produced by [`TechnicianSnapshot`], so list views,
//! profile views, and acceptance re-checks cannot drift apart.

use std::time::Duration;

use dispatch_core::audit::{availability_updated_action, entity_types};
use dispatch_core::availability::{DaySchedule, TechnicianSnapshot};
use dispatch_core::error::CoreError;
use dispatch_core::roles::Actor;
use dispatch_core::technician::validate_max_active_jobs;
use dispatch_core::types::{Date, DbId, Timestamp};
use dispatch_db::models::audit::CreateAuditLog;
use dispatch_db::models::technician::{Technician, UpdateTechnicianAvailability};
use dispatch_db::repositories::{
    AuditLogRepo, JobRepo, TechnicianRepo, TimeOffRepo, WorkingHoursRepo,
};
use dispatch_db::{DbPool, UnitOfWork};
use serde::Serialize;
use sqlx::PgConnection;

use crate::error::{validation, ServiceResult};

/// Availability facts for one technician at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityView {
    pub technician_id: DbId,
    pub effective_availability: bool,
    pub on_leave_now: bool,
    pub current_shift_window: Option<String>,
    pub next_time_off_start: Option<Date>,
    pub active_jobs: i64,
    pub max_active_jobs: i32,
    pub evaluated_at: Timestamp,
}

/// Build the engine snapshot for a technician row already in hand.
///
/// Time off that ended before `today` is irrelevant to every derived query
/// and is not loaded.
pub(crate) async fn load_snapshot(
    conn: &mut PgConnection,
    technician: &Technician,
    today: Date,
) -> ServiceResult<TechnicianSnapshot> {
    let status = technician.status().map_err(CoreError::Internal)?;
    let weekly_schedule = WorkingHoursRepo::list_for_technician(&mut *conn, technician.id)
        .await?
        .iter()
        .map(DaySchedule::from)
        .collect();
    let time_off = TimeOffRepo::list_active_from(&mut *conn, technician.id, today)
        .await?
        .iter()
        .map(|entry| entry.span())
        .collect();

    Ok(TechnicianSnapshot {
        status,
        manual_availability: technician.manual_availability,
        weekly_schedule,
        time_off,
    })
}

pub(crate) async fn find_technician(
    conn: &mut PgConnection,
    technician_id: DbId,
) -> ServiceResult<Technician> {
    TechnicianRepo::find_by_id(conn, technician_id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "technician",
                id: technician_id,
            }
            .into()
        })
}

/// Lock-free availability reads plus the audited availability toggle.
#[derive(Clone)]
pub struct AvailabilityService {
    pool: DbPool,
    lock_timeout: Duration,
}

impl AvailabilityService {
    pub fn new(pool: DbPool, lock_timeout: Duration) -> Self {
        Self { pool, lock_timeout }
    }

    /// Effective availability of a technician at `now`.
    pub async fn effective_availability(&self, technician_id: DbId, now: Timestamp) -> ServiceResult<bool> {
        let mut conn = self.pool.acquire().await?;
        let technician = find_technician(&mut conn, technician_id).await?;
        let snapshot = load_snapshot(&mut conn, &technician, now.date_naive()).await?;
        Ok(snapshot.effective_availability(now))
    }

    /// Full availability summary. Runs without locks and may be slightly
    /// stale; acceptance re-checks under lease.
    pub async fn summary(&self, technician_id: DbId, now: Timestamp) -> ServiceResult<AvailabilityView> {
        let mut conn = self.pool.acquire().await?;
        let technician = find_technician(&mut conn, technician_id).await?;
        let snapshot = load_snapshot(&mut conn, &technician, now.date_naive()).await?;
        let active_jobs = JobRepo::count_active_for_technician(&mut *conn, technician_id).await?;
        let summary = snapshot.summary(now);

        Ok(AvailabilityView {
            technician_id,
            effective_availability: summary.effective_availability,
            on_leave_now: summary.on_leave_now,
            current_shift_window: summary.current_shift_window,
            next_time_off_start: summary.next_time_off_start,
            active_jobs,
            max_active_jobs: technician.max_active_jobs,
            evaluated_at: now,
        })
    }

    /// Apply a partial availability/capacity update and audit it.
    pub async fn update(
        &self,
        actor: Actor,
        technician_id: DbId,
        input: &UpdateTechnicianAvailability,
    ) -> ServiceResult<Technician> {
        if input.is_empty() {
            return Err(validation("At least one field must be provided".into()));
        }
        if let Some(max) = input.max_active_jobs {
            validate_max_active_jobs(max).map_err(validation)?;
        }

        let mut uow = UnitOfWork::begin(&self.pool, self.lock_timeout).await?;
        let before = uow
            .lease_technician(technician_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "technician",
                id: technician_id,
            })?;

        let updated = TechnicianRepo::update_availability(uow.conn(), technician_id, input)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "technician",
                id: technician_id,
            })?;

        AuditLogRepo::create(
            uow.conn(),
            &CreateAuditLog::new(
                actor,
                availability_updated_action(actor.role),
                entity_types::TECHNICIAN,
                technician_id,
            )
            .with_metadata(serde_json::json!({
                "before": {
                    "manual_availability": before.manual_availability,
                    "max_active_jobs": before.max_active_jobs,
                    "status": before.status,
                },
                "after": {
                    "manual_availability": updated.manual_availability,
                    "max_active_jobs": updated.max_active_jobs,
                    "status": updated.status,
                },
            })),
        )
        .await?;

        uow.commit().await?;

        tracing::info!(
            technician_id,
            actor_role = %actor.role,
            actor_id = actor.id,
            manual_availability = updated.manual_availability,
            max_active_jobs = updated.max_active_jobs,
            status = %updated.status,
            "Technician availability updated"
        );
        Ok(updated)
    }
}
