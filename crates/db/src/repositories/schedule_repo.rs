//! Repository for the `technician_working_hours` table.

use dispatch_core::schedule::WeeklyScheduleEntryInput;
use dispatch_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::schedule::WorkingHours;

/// Column list for working hours queries.
const COLUMNS: &str = "id, technician_id, day_of_week, is_enabled, start_time, end_time, \
    created_at, updated_at";

/// Provides reads and whole-week replacement of shift rows.
pub struct WorkingHoursRepo;

impl WorkingHoursRepo {
    /// List a technician's shift rows ordered Monday first.
    pub async fn list_for_technician<'e, E>(
        executor: E,
        technician_id: DbId,
    ) -> Result<Vec<WorkingHours>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM technician_working_hours
             WHERE technician_id = $1
             ORDER BY day_of_week"
        );
        sqlx::query_as::<_, WorkingHours>(&query)
            .bind(technician_id)
            .fetch_all(executor)
            .await
    }

    /// Swap the full week for a technician.
    ///
    /// Must run inside a transaction: the delete and re-insert are only
    /// invisible to other sessions until commit.
    pub async fn replace_all(
        conn: &mut PgConnection,
        technician_id: DbId,
        entries: &[WeeklyScheduleEntryInput],
    ) -> Result<Vec<WorkingHours>, sqlx::Error> {
        sqlx::query("DELETE FROM technician_working_hours WHERE technician_id = $1")
            .bind(technician_id)
            .execute(&mut *conn)
            .await?;

        let query = format!(
            "INSERT INTO technician_working_hours
                (technician_id, day_of_week, is_enabled, start_time, end_time)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );

        let mut rows = Vec::with_capacity(entries.len());
        for entry in entries {
            let row = sqlx::query_as::<_, WorkingHours>(&query)
                .bind(technician_id)
                .bind(entry.day_of_week)
                .bind(entry.is_enabled)
                .bind(entry.start_time)
                .bind(entry.end_time)
                .fetch_one(&mut *conn)
                .await?;
            rows.push(row);
        }
        rows.sort_by_key(|row| row.day_of_week);
        Ok(rows)
    }
}
