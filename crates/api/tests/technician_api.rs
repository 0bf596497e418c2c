//! HTTP-level tests for technician-facing endpoints: availability,
//! readiness, accept/reject, and self-service time off.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, days_from_today, delete_auth, get_auth, patch_json_auth, post_auth,
    post_json_auth, seed_job, seed_technician, technician_token,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_availability_summary_at_instant(pool: PgPool) {
    let fx = seed_technician(&pool).await;
    let app = common::build_test_app(pool);

    let uri = format!(
        "/api/v1/technicians/{}/availability?at=2030-01-07T10:00:00Z",
        fx.technician_id
    );
    let response = get_auth(app, &uri, &technician_token(fx.technician_id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["technician_id"], fx.technician_id);
    assert_eq!(data["effective_availability"], true);
    assert_eq!(data["on_leave_now"], false);
    assert_eq!(data["current_shift_window"], "00:00-23:59");
    assert_eq!(data["active_jobs"], 0);
    assert_eq!(data["max_active_jobs"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_technician_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/technicians/999/availability", &admin_token()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_self_toggle_goes_offline(pool: PgPool) {
    let fx = seed_technician(&pool).await;
    let app = common::build_test_app(pool);
    let token = technician_token(fx.technician_id);

    let response = patch_json_auth(
        app.clone(),
        "/api/v1/technician/availability",
        &token,
        json!({ "manual_availability": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["effective_availability"], false);

    // Capacity is not self-service.
    let response = patch_json_auth(
        app.clone(),
        "/api/v1/technician/availability",
        &token,
        json!({ "manual_availability": true, "max_active_jobs": 10 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Admins use the admin endpoint.
    let response = patch_json_auth(
        app,
        "/api/v1/technician/availability",
        &admin_token(),
        json!({ "manual_availability": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Readiness, accept, reject
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_readiness_breakdown(pool: PgPool) {
    let fx = seed_technician(&pool).await;
    let job_id = seed_job(&pool, "JOB-1", &fx).await;
    let app = common::build_test_app(pool);

    let uri = format!(
        "/api/v1/technicians/{}/readiness/{job_id}?at=2030-01-07T10:00:00Z",
        fx.technician_id
    );
    let response = get_auth(app, &uri, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["zone_match"], true);
    assert_eq!(json["data"]["skill_match"], true);
    assert_eq!(json["data"]["can_assign"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_accept_then_replay(pool: PgPool) {
    let fx = seed_technician(&pool).await;
    let job_id = seed_job(&pool, "JOB-1", &fx).await;
    let app = common::build_test_app(pool);
    let token = technician_token(fx.technician_id);
    let uri = format!("/api/v1/technicians/{}/jobs/{job_id}/accept", fx.technician_id);

    let response = post_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ASSIGNED");
    assert_eq!(json["data"]["assigned_tech_id"], fx.technician_id);

    let response = post_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_STATE");
    assert_eq!(json["details"]["status"], "ASSIGNED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_technician_cannot_act_for_another(pool: PgPool) {
    let fx = seed_technician(&pool).await;
    let job_id = seed_job(&pool, "JOB-1", &fx).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/technicians/{}/jobs/{job_id}/accept", fx.technician_id);
    let response = post_auth(app, &uri, &technician_token(fx.technician_id + 1)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_accepts_on_behalf(pool: PgPool) {
    let fx = seed_technician(&pool).await;
    let job_id = seed_job(&pool, "JOB-1", &fx).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/technicians/{}/jobs/{job_id}/accept", fx.technician_id);
    let response = post_auth(app, &uri, &admin_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reject_then_accept_is_not_eligible(pool: PgPool) {
    let fx = seed_technician(&pool).await;
    let job_id = seed_job(&pool, "JOB-1", &fx).await;
    let app = common::build_test_app(pool);
    let token = technician_token(fx.technician_id);
    let base = format!("/api/v1/technicians/{}/jobs/{job_id}", fx.technician_id);

    let response = post_json_auth(
        app.clone(),
        &format!("{base}/reject"),
        &token,
        json!({ "reason": "  too far  " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["reason"], "too far");

    let response = post_auth(app.clone(), &format!("{base}/reject"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let response = post_auth(app, &format!("{base}/accept"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_ELIGIBLE");
    assert_eq!(json["details"]["previously_rejected"], true);
    assert_eq!(json["details"]["readiness"]["can_assign"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reject_without_body_and_overlong_reason(pool: PgPool) {
    let fx = seed_technician(&pool).await;
    let first = seed_job(&pool, "JOB-1", &fx).await;
    let second = seed_job(&pool, "JOB-2", &fx).await;
    let app = common::build_test_app(pool);
    let token = technician_token(fx.technician_id);

    let uri = format!("/api/v1/technicians/{}/jobs/{first}/reject", fx.technician_id);
    let response = post_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_json(response).await["data"]["reason"].is_null());

    let uri = format!("/api/v1/technicians/{}/jobs/{second}/reject", fx.technician_id);
    let response =
        post_json_auth(app, &uri, &token, json!({ "reason": "x".repeat(1001) })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Self-service time off
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_self_service_time_off_lifecycle(pool: PgPool) {
    let fx = seed_technician(&pool).await;
    let app = common::build_test_app(pool);
    let token = technician_token(fx.technician_id);
    let start = days_from_today(10);
    let end = days_from_today(12);

    // entry_type is mandatory for technicians.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/technician/time-off",
        &token,
        json!({ "start_date": start, "end_date": end, "reason": "holiday" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/technician/time-off",
        &token,
        json!({
            "entry_type": "multi_day",
            "start_date": start,
            "end_date": end,
            "reason": "holiday",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["entry_type"], "multi_day");

    // Overlap with the entry just created.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/technician/time-off",
        &token,
        json!({
            "entry_type": "full_day",
            "start_date": end,
            "end_date": end,
            "reason": "again",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get_auth(app.clone(), "/api/v1/technician/time-off", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let response =
        delete_auth(app.clone(), &format!("/api/v1/technician/time-off/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"]["cancelled_at"].is_string());

    let response = delete_auth(app, &format!("/api/v1/technician/time-off/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
