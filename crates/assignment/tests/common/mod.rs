//! Shared fixtures for service integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use dispatch_assignment::Services;
use dispatch_core::assignment::JobStatus;
use dispatch_core::schedule::WeeklyScheduleEntryInput;
use dispatch_core::types::{Date, DbId, Timestamp};
use dispatch_db::models::job::CreateJob;
use dispatch_db::models::technician::CreateTechnician;
use dispatch_db::repositories::{CoverageRepo, JobRepo, TechnicianRepo, WorkingHoursRepo};
use dispatch_events::EventBus;
use sqlx::PgPool;

pub const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// 2030-01-07 is a Monday.
pub fn monday() -> Date {
    NaiveDate::from_ymd_opt(2030, 1, 7).unwrap()
}

pub fn monday_at(hour: u32, minute: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2030, 1, 7, hour, minute, 0).unwrap()
}

pub fn date(month: u32, day: u32) -> Date {
    NaiveDate::from_ymd_opt(2030, month, day).unwrap()
}

pub fn services(pool: &PgPool) -> (Services, Arc<EventBus>) {
    let bus = Arc::new(EventBus::default());
    (
        Services::new(pool.clone(), LOCK_TIMEOUT, Arc::clone(&bus)),
        bus,
    )
}

pub struct Coverage {
    pub zone_id: DbId,
    pub skill_id: DbId,
}

pub async fn seed_coverage(pool: &PgPool) -> Coverage {
    let zone = CoverageRepo::create_zone(pool, "North").await.unwrap();
    let skill = CoverageRepo::create_skill(pool, "HVAC").await.unwrap();
    Coverage {
        zone_id: zone.id,
        skill_id: skill.id,
    }
}

/// Seven-day week, every day enabled 08:00-17:00.
pub fn full_week() -> Vec<WeeklyScheduleEntryInput> {
    (0..7)
        .map(|day| WeeklyScheduleEntryInput {
            day_of_week: day,
            is_enabled: true,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        })
        .collect()
}

/// An active technician covering `coverage`, on shift 08:00-17:00 daily.
pub async fn seed_technician(
    pool: &PgPool,
    email: &str,
    max_active_jobs: i32,
    coverage: &Coverage,
) -> DbId {
    let tech = TechnicianRepo::create(
        pool,
        &CreateTechnician {
            name: format!("Tech {email}"),
            email: email.to_string(),
            phone: None,
            max_active_jobs: Some(max_active_jobs),
        },
    )
    .await
    .unwrap();

    CoverageRepo::assign_zone(pool, tech.id, coverage.zone_id)
        .await
        .unwrap();
    CoverageRepo::assign_skill(pool, tech.id, coverage.skill_id)
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    WorkingHoursRepo::replace_all(&mut tx, tech.id, &full_week())
        .await
        .unwrap();
    tx.commit().await.unwrap();

    tech.id
}

/// A job on offer in the given coverage.
pub async fn seed_job(pool: &PgPool, code: &str, coverage: &Coverage) -> DbId {
    JobRepo::create(
        pool,
        &CreateJob {
            job_code: code.to_string(),
            status: JobStatus::ReadyForTechAcceptance,
            zone_id: Some(coverage.zone_id),
            skill_id: Some(coverage.skill_id),
            assigned_tech_id: None,
        },
    )
    .await
    .unwrap()
    .id
}
