//! Audit log models.
//!
//! Audit rows are write-once and always inserted through the same
//! connection as the mutation they describe.

use dispatch_core::roles::Actor;
use dispatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `audit_logs` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AuditLog {
    pub id: DbId,
    pub actor_role: String,
    pub actor_id: DbId,
    pub action: String,
    pub entity_type: String,
    pub entity_id: DbId,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub actor: Actor,
    pub action: &'static str,
    pub entity_type: &'static str,
    pub entity_id: DbId,
    pub metadata: serde_json::Value,
}

impl CreateAuditLog {
    pub fn new(actor: Actor, action: &'static str, entity_type: &'static str, entity_id: DbId) -> Self {
        Self {
            actor,
            action,
            entity_type,
            entity_id,
            metadata: serde_json::json!({}),
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}
