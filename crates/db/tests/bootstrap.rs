//! Schema-level guarantees that must hold even without application checks.

use chrono::NaiveDate;
use dispatch_core::assignment::JobStatus;
use dispatch_core::time_off::TimeOffEntryType;
use dispatch_db::models::job::CreateJob;
use dispatch_db::models::technician::CreateTechnician;
use dispatch_db::models::time_off::CreateTimeOff;
use dispatch_db::repositories::{JobRejectionRepo, JobRepo, TechnicianRepo, TimeOffRepo};
use sqlx::PgPool;

fn new_technician(email: &str) -> CreateTechnician {
    CreateTechnician {
        name: "Bootstrap Tech".to_string(),
        email: email.to_string(),
        phone: None,
        max_active_jobs: None,
    }
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|c| c.into_owned())
}

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, m, d).unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check(pool: PgPool) {
    dispatch_db::health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_technician_defaults(pool: PgPool) {
    let tech = TechnicianRepo::create(&pool, &new_technician("defaults@example.com"))
        .await
        .unwrap();
    assert!(tech.is_active());
    assert!(tech.manual_availability);
    assert_eq!(tech.max_active_jobs, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_max_active_jobs_check_constraint(pool: PgPool) {
    let mut input = new_technician("zero@example.com");
    input.max_active_jobs = Some(0);
    let err = TechnicianRepo::create(&pool, &input).await.unwrap_err();
    assert_eq!(sqlstate(&err).as_deref(), Some("23514"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overlapping_time_off_rejected_by_schema(pool: PgPool) {
    let tech = TechnicianRepo::create(&pool, &new_technician("overlap@example.com"))
        .await
        .unwrap();
    let first = CreateTimeOff {
        entry_type: TimeOffEntryType::MultiDay,
        start_date: date(3, 1),
        end_date: date(3, 5),
        reason: "vacation".to_string(),
    };
    TimeOffRepo::create(&pool, tech.id, &first).await.unwrap();

    let touching = CreateTimeOff {
        start_date: date(3, 5),
        end_date: date(3, 7),
        ..first.clone()
    };
    let err = TimeOffRepo::create(&pool, tech.id, &touching).await.unwrap_err();
    assert_eq!(sqlstate(&err).as_deref(), Some("23P01"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancelled_time_off_frees_range(pool: PgPool) {
    let tech = TechnicianRepo::create(&pool, &new_technician("cancel@example.com"))
        .await
        .unwrap();
    let entry = CreateTimeOff {
        entry_type: TimeOffEntryType::FullDay,
        start_date: date(4, 1),
        end_date: date(4, 1),
        reason: "appointment".to_string(),
    };
    let created = TimeOffRepo::create(&pool, tech.id, &entry).await.unwrap();

    let cancelled = TimeOffRepo::cancel(&pool, created.id, chrono::Utc::now())
        .await
        .unwrap()
        .expect("entry should be cancellable");
    assert!(cancelled.is_cancelled());

    // A second cancel finds nothing to update.
    assert!(TimeOffRepo::cancel(&pool, created.id, chrono::Utc::now())
        .await
        .unwrap()
        .is_none());

    // The range can be booked again and the cancelled row is kept.
    TimeOffRepo::create(&pool, tech.id, &entry).await.unwrap();
    let kept = TimeOffRepo::find_for_technician(&pool, tech.id, created.id)
        .await
        .unwrap();
    assert!(kept.is_some());
    assert_eq!(TimeOffRepo::list_active(&pool, tech.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_rejection_is_unique_violation(pool: PgPool) {
    let tech = TechnicianRepo::create(&pool, &new_technician("reject@example.com"))
        .await
        .unwrap();
    let job = JobRepo::create(
        &pool,
        &CreateJob {
            job_code: "JOB-BOOT-1".to_string(),
            status: JobStatus::ReadyForTechAcceptance,
            zone_id: None,
            skill_id: None,
            assigned_tech_id: None,
        },
    )
    .await
    .unwrap();

    JobRejectionRepo::create(&pool, job.id, tech.id, Some("too far"))
        .await
        .unwrap();
    let err = JobRejectionRepo::create(&pool, job.id, tech.id, None)
        .await
        .unwrap_err();
    assert_eq!(sqlstate(&err).as_deref(), Some("23505"));
    assert_eq!(JobRejectionRepo::list_for_job(&pool, job.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_job_requires_technician(pool: PgPool) {
    let err = JobRepo::create(
        &pool,
        &CreateJob {
            job_code: "JOB-BOOT-2".to_string(),
            status: JobStatus::Assigned,
            zone_id: None,
            skill_id: None,
            assigned_tech_id: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(sqlstate(&err).as_deref(), Some("23514"));
}
