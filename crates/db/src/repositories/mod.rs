//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Single
//! statement methods are generic over [`sqlx::PgExecutor`] so they run
//! equally against the pool or inside a [`crate::UnitOfWork`]; methods that
//! issue several statements take `&mut PgConnection` and expect the caller
//! to hold the transaction.

pub mod audit_repo;
pub mod coverage_repo;
pub mod job_rejection_repo;
pub mod job_repo;
pub mod notification_repo;
pub mod schedule_repo;
pub mod technician_repo;
pub mod time_off_repo;

pub use audit_repo::AuditLogRepo;
pub use coverage_repo::CoverageRepo;
pub use job_rejection_repo::JobRejectionRepo;
pub use job_repo::JobRepo;
pub use notification_repo::AdminNotificationRepo;
pub use schedule_repo::WorkingHoursRepo;
pub use technician_repo::TechnicianRepo;
pub use time_off_repo::TimeOffRepo;
