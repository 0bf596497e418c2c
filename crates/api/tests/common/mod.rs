//! Shared helpers for HTTP-level integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use chrono::{NaiveTime, Utc};
use dispatch_api::auth::jwt::{generate_access_token, JwtConfig};
use dispatch_api::config::ServerConfig;
use dispatch_api::router::build_app_router;
use dispatch_api::state::AppState;
use dispatch_assignment::Services;
use dispatch_core::assignment::JobStatus;
use dispatch_core::roles::ActorRole;
use dispatch_core::schedule::WeeklyScheduleEntryInput;
use dispatch_core::types::{Date, DbId};
use dispatch_db::models::job::CreateJob;
use dispatch_db::models::technician::CreateTechnician;
use dispatch_db::repositories::{CoverageRepo, JobRepo, TechnicianRepo, WorkingHoursRepo};
use dispatch_events::EventBus;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const ADMIN_ID: DbId = 1;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router, with the production middleware
/// stack, over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let event_bus = Arc::new(EventBus::default());
    let state = AppState {
        services: Services::new(pool.clone(), Duration::from_secs(5), Arc::clone(&event_bus)),
        pool,
        config: Arc::new(config.clone()),
        event_bus,
    };
    build_app_router(state, &config)
}

pub fn admin_token() -> String {
    generate_access_token(ADMIN_ID, ActorRole::Admin, &test_config().jwt).unwrap()
}

pub fn technician_token(technician_id: DbId) -> String {
    generate_access_token(technician_id, ActorRole::Technician, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn today() -> Date {
    Utc::now().date_naive()
}

pub fn days_from_today(days: u64) -> Date {
    today() + chrono::Days::new(days)
}

/// A week that is on shift for (nearly) the whole of every day, so
/// wall-clock-driven requests see the technician as available.
pub fn all_day_week() -> Vec<WeeklyScheduleEntryInput> {
    (0..7)
        .map(|day| WeeklyScheduleEntryInput {
            day_of_week: day,
            is_enabled: true,
            start_time: NaiveTime::MIN,
            end_time: NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
        })
        .collect()
}

pub struct Fixture {
    pub technician_id: DbId,
    pub zone_id: DbId,
    pub skill_id: DbId,
}

/// One active technician with zone, skill, and an all-day week.
pub async fn seed_technician(pool: &PgPool) -> Fixture {
    let zone = CoverageRepo::create_zone(pool, "Central").await.unwrap();
    let skill = CoverageRepo::create_skill(pool, "Plumbing").await.unwrap();
    let tech = TechnicianRepo::create(
        pool,
        &CreateTechnician {
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            phone: None,
            max_active_jobs: None,
        },
    )
    .await
    .unwrap();
    CoverageRepo::assign_zone(pool, tech.id, zone.id).await.unwrap();
    CoverageRepo::assign_skill(pool, tech.id, skill.id).await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    WorkingHoursRepo::replace_all(&mut tx, tech.id, &all_day_week())
        .await
        .unwrap();
    tx.commit().await.unwrap();

    Fixture {
        technician_id: tech.id,
        zone_id: zone.id,
        skill_id: skill.id,
    }
}

/// A job on offer that matches the fixture's coverage.
pub async fn seed_job(pool: &PgPool, code: &str, fixture: &Fixture) -> DbId {
    JobRepo::create(
        pool,
        &CreateJob {
            job_code: code.to_string(),
            status: JobStatus::ReadyForTechAcceptance,
            zone_id: Some(fixture.zone_id),
            skill_id: Some(fixture.skill_id),
            assigned_tech_id: None,
        },
    )
    .await
    .unwrap()
    .id
}
