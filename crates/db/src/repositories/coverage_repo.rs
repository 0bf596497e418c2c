//! Repository for zones, skills, and technician coverage links.

use dispatch_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::coverage::CoverageItem;

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Zone/skill membership lookups used by readiness evaluation.
pub struct CoverageRepo;

impl CoverageRepo {
    pub async fn create_zone<'e, E>(executor: E, name: &str) -> Result<CoverageItem, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("INSERT INTO zones (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, CoverageItem>(&query)
            .bind(name)
            .fetch_one(executor)
            .await
    }

    pub async fn create_skill<'e, E>(executor: E, name: &str) -> Result<CoverageItem, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("INSERT INTO skills (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, CoverageItem>(&query)
            .bind(name)
            .fetch_one(executor)
            .await
    }

    /// Link a zone to a technician. Linking twice is a no-op.
    pub async fn assign_zone<'e, E>(
        executor: E,
        technician_id: DbId,
        zone_id: DbId,
    ) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            "INSERT INTO technician_zones (technician_id, zone_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(technician_id)
        .bind(zone_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Link a skill to a technician. Linking twice is a no-op.
    pub async fn assign_skill<'e, E>(
        executor: E,
        technician_id: DbId,
        skill_id: DbId,
    ) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            "INSERT INTO technician_skills (technician_id, skill_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(technician_id)
        .bind(skill_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn zone_ids_for<'e, E>(executor: E, technician_id: DbId) -> Result<Vec<DbId>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, DbId>(
            "SELECT zone_id FROM technician_zones WHERE technician_id = $1 ORDER BY zone_id",
        )
        .bind(technician_id)
        .fetch_all(executor)
        .await
    }

    pub async fn skill_ids_for<'e, E>(
        executor: E,
        technician_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, DbId>(
            "SELECT skill_id FROM technician_skills WHERE technician_id = $1 ORDER BY skill_id",
        )
        .bind(technician_id)
        .fetch_all(executor)
        .await
    }
}
