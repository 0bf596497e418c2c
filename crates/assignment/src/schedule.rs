//! Weekly schedule reads and atomic whole-week replacement.

use std::time::Duration;

use dispatch_core::audit::{actions, entity_types};
use dispatch_core::error::CoreError;
use dispatch_core::roles::Actor;
use dispatch_core::schedule::{day_name, validate_weekly_schedule, WeeklyScheduleEntryInput, MAX_DAY_OF_WEEK};
use dispatch_core::types::{DbId, TimeOfDay};
use dispatch_db::models::audit::CreateAuditLog;
use dispatch_db::models::schedule::WorkingHours;
use dispatch_db::repositories::{AuditLogRepo, WorkingHoursRepo};
use dispatch_db::{DbPool, UnitOfWork};
use serde::Serialize;

use crate::availability::find_technician;
use crate::error::{validation, ServiceResult};

/// One weekday of the schedule view. Days without a row are reported as
/// disabled with no times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSlot {
    pub day_of_week: i16,
    pub day_name: &'static str,
    pub is_enabled: bool,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
}

/// Expand stored rows into seven slots, Monday first.
pub fn to_slots(rows: &[WorkingHours]) -> Vec<ScheduleSlot> {
    (0..=MAX_DAY_OF_WEEK)
        .map(|day| {
            let row = rows.iter().find(|r| r.day_of_week == day);
            ScheduleSlot {
                day_of_week: day,
                day_name: day_name(day).unwrap_or_default(),
                is_enabled: row.is_some_and(|r| r.is_enabled),
                start_time: row.map(|r| r.start_time),
                end_time: row.map(|r| r.end_time),
            }
        })
        .collect()
}

#[derive(Clone)]
pub struct WeeklySchedule {
    pool: DbPool,
    lock_timeout: Duration,
}

impl WeeklySchedule {
    pub fn new(pool: DbPool, lock_timeout: Duration) -> Self {
        Self { pool, lock_timeout }
    }

    pub async fn get(&self, technician_id: DbId) -> ServiceResult<Vec<ScheduleSlot>> {
        let mut conn = self.pool.acquire().await?;
        find_technician(&mut conn, technician_id).await?;
        let rows = WorkingHoursRepo::list_for_technician(&mut *conn, technician_id).await?;
        Ok(to_slots(&rows))
    }

    /// Replace all seven days in one transaction. Concurrent readers see
    /// either the old week or the new one.
    pub async fn replace(
        &self,
        actor: Actor,
        technician_id: DbId,
        entries: &[WeeklyScheduleEntryInput],
    ) -> ServiceResult<Vec<ScheduleSlot>> {
        validate_weekly_schedule(entries).map_err(validation)?;

        let mut uow = UnitOfWork::begin(&self.pool, self.lock_timeout).await?;
        uow.lease_technician(technician_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "technician",
                id: technician_id,
            })?;

        let rows = WorkingHoursRepo::replace_all(uow.conn(), technician_id, entries).await?;

        AuditLogRepo::create(
            uow.conn(),
            &CreateAuditLog::new(
                actor,
                actions::ADMIN_WEEKLY_SCHEDULE_UPDATED,
                entity_types::TECHNICIAN_SCHEDULE,
                technician_id,
            )
            .with_metadata(serde_json::json!({ "entries": entries })),
        )
        .await?;

        uow.commit().await?;

        tracing::info!(
            technician_id,
            enabled_days = rows.iter().filter(|r| r.is_enabled).count(),
            actor_id = actor.id,
            "Weekly schedule replaced"
        );
        Ok(to_slots(&rows))
    }
}
