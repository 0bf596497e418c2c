//! Request-scoped transaction with ordered row leases.
//!
//! A [`UnitOfWork`] owns one Postgres transaction. Leases are
//! `SELECT ... FOR UPDATE` row locks held until commit or rollback, bounded
//! by a per-transaction `lock_timeout`.
//!
//! Lock order is fixed: a job lease may never be requested after a
//! technician lease in the same unit. Violations are rejected before any
//! statement is sent.

use std::time::Duration;

use dispatch_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::models::job::Job;
use crate::models::technician::Technician;
use crate::repositories::{JobRepo, TechnicianRepo};

/// Postgres `lock_not_available`, raised when `lock_timeout` elapses.
const LOCK_NOT_AVAILABLE: &str = "55P03";

#[derive(Debug, thiserror::Error)]
pub enum LeaseError {
    #[error("Timed out waiting for a lease on {entity} {id}")]
    Timeout { entity: &'static str, id: DbId },

    #[error("Lock order violation: {requested} lease requested while holding a {held} lease")]
    OrderViolation {
        requested: &'static str,
        held: &'static str,
    },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl LeaseError {
    fn from_sqlx(err: sqlx::Error, entity: &'static str, id: DbId) -> Self {
        let timed_out = err
            .as_database_error()
            .and_then(|db| db.code())
            .is_some_and(|code| code == LOCK_NOT_AVAILABLE);
        if timed_out {
            tracing::warn!(entity, id, "Lease wait exceeded lock_timeout");
            LeaseError::Timeout { entity, id }
        } else {
            LeaseError::Database(err)
        }
    }
}

/// One request's transaction. Dropping it without [`UnitOfWork::commit`]
/// rolls everything back.
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
    technician_leased: bool,
}

impl UnitOfWork {
    /// Begin a transaction and bound every lease wait by `lock_timeout`.
    pub async fn begin(pool: &PgPool, lock_timeout: Duration) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // SET does not accept bind parameters.
        let timeout_ms = lock_timeout.as_millis().max(1);
        sqlx::query(&format!("SET LOCAL lock_timeout = '{timeout_ms}ms'"))
            .execute(&mut *tx)
            .await?;

        Ok(Self {
            tx,
            technician_leased: false,
        })
    }

    /// Connection for repository calls inside this transaction.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// Lock a job row. Must precede any technician lease.
    pub async fn lease_job(&mut self, job_id: DbId) -> Result<Option<Job>, LeaseError> {
        if self.technician_leased {
            return Err(LeaseError::OrderViolation {
                requested: "job",
                held: "technician",
            });
        }
        JobRepo::lock_for_update(&mut *self.tx, job_id)
            .await
            .map_err(|e| LeaseError::from_sqlx(e, "job", job_id))
    }

    /// Lock a technician row.
    pub async fn lease_technician(
        &mut self,
        technician_id: DbId,
    ) -> Result<Option<Technician>, LeaseError> {
        let technician = TechnicianRepo::lock_for_update(&mut *self.tx, technician_id)
            .await
            .map_err(|e| LeaseError::from_sqlx(e, "technician", technician_id))?;
        self.technician_leased = true;
        Ok(technician)
    }

    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }

    pub async fn rollback(self) -> Result<(), sqlx::Error> {
        self.tx.rollback().await
    }
}
