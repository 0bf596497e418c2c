//! Repository for the `technicians` table.

use dispatch_core::technician::DEFAULT_MAX_ACTIVE_JOBS;
use dispatch_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::technician::{CreateTechnician, Technician, UpdateTechnicianAvailability};

/// Column list for technician queries.
const COLUMNS: &str = "id, name, email, phone, status, manual_availability, \
    max_active_jobs, created_at, updated_at";

/// Provides technician lookups and availability updates.
pub struct TechnicianRepo;

impl TechnicianRepo {
    /// Insert a new technician in `active` status, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateTechnician) -> Result<Technician, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO technicians (name, email, phone, max_active_jobs)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Technician>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.max_active_jobs.unwrap_or(DEFAULT_MAX_ACTIVE_JOBS))
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Technician>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM technicians WHERE id = $1");
        sqlx::query_as::<_, Technician>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Fetch and lock a technician row until the surrounding transaction ends.
    pub async fn lock_for_update<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Technician>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM technicians WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Technician>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Apply a partial availability update. Returns `None` if not found.
    pub async fn update_availability<'e, E>(
        executor: E,
        id: DbId,
        input: &UpdateTechnicianAvailability,
    ) -> Result<Option<Technician>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE technicians SET
                manual_availability = COALESCE($1, manual_availability),
                max_active_jobs = COALESCE($2, max_active_jobs),
                status = COALESCE($3, status)
             WHERE id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Technician>(&query)
            .bind(input.manual_availability)
            .bind(input.max_active_jobs)
            .bind(input.status.map(|s| s.as_str()))
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
