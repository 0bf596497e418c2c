//! Admin inbox notification models.

use dispatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `admin_notifications` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminNotification {
    pub id: DbId,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub technician_id: Option<DbId>,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub is_read: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateAdminNotification {
    pub kind: String,
    pub title: String,
    pub body: String,
    pub technician_id: Option<DbId>,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
}
