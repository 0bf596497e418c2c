//! Repository for the `admin_notifications` inbox.

use sqlx::PgExecutor;

use crate::models::notification::{AdminNotification, CreateAdminNotification};

const COLUMNS: &str = "id, kind, title, body, technician_id, entity_type, entity_id, \
    is_read, created_at";

pub struct AdminNotificationRepo;

impl AdminNotificationRepo {
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateAdminNotification,
    ) -> Result<AdminNotification, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO admin_notifications
                (kind, title, body, technician_id, entity_type, entity_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminNotification>(&query)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.technician_id)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .fetch_one(executor)
            .await
    }

    /// Most recent unread notifications, newest first.
    pub async fn list_unread<'e, E>(executor: E, limit: i64) -> Result<Vec<AdminNotification>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM admin_notifications
             WHERE is_read = FALSE
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, AdminNotification>(&query)
            .bind(limit)
            .fetch_all(executor)
            .await
    }
}
