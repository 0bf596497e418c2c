//! Repository for the `technician_time_off` table.

use dispatch_core::types::{Date, DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::time_off::{CreateTimeOff, TimeOff};

/// Column list for time-off queries.
const COLUMNS: &str = "id, technician_id, entry_type, start_date, end_date, reason, \
    cancelled_at, created_at, updated_at";

/// Provides time-off inserts, lookups, and soft cancellation.
pub struct TimeOffRepo;

impl TimeOffRepo {
    pub async fn create<'e, E>(
        executor: E,
        technician_id: DbId,
        input: &CreateTimeOff,
    ) -> Result<TimeOff, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO technician_time_off
                (technician_id, entry_type, start_date, end_date, reason)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeOff>(&query)
            .bind(technician_id)
            .bind(input.entry_type.as_str())
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.reason)
            .fetch_one(executor)
            .await
    }

    /// Find an entry belonging to a technician, cancelled or not.
    pub async fn find_for_technician<'e, E>(
        executor: E,
        technician_id: DbId,
        id: DbId,
    ) -> Result<Option<TimeOff>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM technician_time_off
             WHERE id = $1 AND technician_id = $2"
        );
        sqlx::query_as::<_, TimeOff>(&query)
            .bind(id)
            .bind(technician_id)
            .fetch_optional(executor)
            .await
    }

    /// All non-cancelled entries, earliest first.
    pub async fn list_active<'e, E>(executor: E, technician_id: DbId) -> Result<Vec<TimeOff>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM technician_time_off
             WHERE technician_id = $1 AND cancelled_at IS NULL
             ORDER BY start_date, id"
        );
        sqlx::query_as::<_, TimeOff>(&query)
            .bind(technician_id)
            .fetch_all(executor)
            .await
    }

    /// Non-cancelled entries that have not ended before `from_date`.
    pub async fn list_active_from<'e, E>(
        executor: E,
        technician_id: DbId,
        from_date: Date,
    ) -> Result<Vec<TimeOff>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM technician_time_off
             WHERE technician_id = $1
               AND cancelled_at IS NULL
               AND end_date >= $2
             ORDER BY start_date, id"
        );
        sqlx::query_as::<_, TimeOff>(&query)
            .bind(technician_id)
            .bind(from_date)
            .fetch_all(executor)
            .await
    }

    /// First non-cancelled entry whose inclusive range overlaps `[start, end]`.
    pub async fn find_overlapping<'e, E>(
        executor: E,
        technician_id: DbId,
        start_date: Date,
        end_date: Date,
    ) -> Result<Option<TimeOff>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM technician_time_off
             WHERE technician_id = $1
               AND cancelled_at IS NULL
               AND start_date <= $3
               AND end_date >= $2
             ORDER BY start_date
             LIMIT 1"
        );
        sqlx::query_as::<_, TimeOff>(&query)
            .bind(technician_id)
            .bind(start_date)
            .bind(end_date)
            .fetch_optional(executor)
            .await
    }

    /// Stamp `cancelled_at`. Returns `None` if missing or already cancelled.
    pub async fn cancel<'e, E>(
        executor: E,
        id: DbId,
        cancelled_at: Timestamp,
    ) -> Result<Option<TimeOff>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE technician_time_off SET cancelled_at = $2
             WHERE id = $1 AND cancelled_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeOff>(&query)
            .bind(id)
            .bind(cancelled_at)
            .fetch_optional(executor)
            .await
    }
}
