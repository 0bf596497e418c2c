//! Repository for the `audit_logs` table.

use dispatch_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::audit::{AuditLog, CreateAuditLog};

/// Column list for `audit_logs` SELECT queries.
const COLUMNS: &str = "id, actor_role, actor_id, action, entity_type, entity_id, metadata, created_at";

/// Provides inserts and entity-scoped reads of the audit trail.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Insert an audit row. Pass the mutation's transaction connection.
    pub async fn create<'e, E>(executor: E, entry: &CreateAuditLog) -> Result<AuditLog, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO audit_logs (actor_role, actor_id, action, entity_type, entity_id, metadata)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(entry.actor.role.as_str())
            .bind(entry.actor.id)
            .bind(entry.action)
            .bind(entry.entity_type)
            .bind(entry.entity_id)
            .bind(&entry.metadata)
            .fetch_one(executor)
            .await
    }

    /// Audit rows for one entity, oldest first.
    pub async fn list_for_entity<'e, E>(
        executor: E,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<AuditLog>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs
             WHERE entity_type = $1 AND entity_id = $2
             ORDER BY id"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(executor)
            .await
    }
}
