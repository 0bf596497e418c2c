//! Availability and assignment services.
//!
//! Each service owns a pool handle and the configured lease wait bound.
//! Reads run lock-free at read-committed; every mutation runs in a single
//! [`dispatch_db::UnitOfWork`] that also writes its audit row.

pub mod availability;
pub mod coordinator;
pub mod error;
pub mod readiness;
pub mod rejection;
pub mod schedule;
pub mod time_off;

use std::sync::Arc;
use std::time::Duration;

use dispatch_db::DbPool;
use dispatch_events::EventBus;

pub use availability::{AvailabilityService, AvailabilityView};
pub use coordinator::AssignmentCoordinator;
pub use error::{ServiceError, ServiceResult};
pub use readiness::ReadinessEvaluator;
pub use rejection::RejectionLedger;
pub use schedule::{ScheduleSlot, WeeklySchedule};
pub use time_off::{CreateTimeOffRequest, TimeOffLedger};

/// All services sharing one pool, lock timeout, and event bus.
#[derive(Clone)]
pub struct Services {
    pub availability: AvailabilityService,
    pub time_off: TimeOffLedger,
    pub schedule: WeeklySchedule,
    pub readiness: ReadinessEvaluator,
    pub coordinator: AssignmentCoordinator,
    pub rejections: RejectionLedger,
}

impl Services {
    pub fn new(pool: DbPool, lock_timeout: Duration, event_bus: Arc<EventBus>) -> Self {
        Self {
            availability: AvailabilityService::new(pool.clone(), lock_timeout),
            time_off: TimeOffLedger::new(pool.clone(), lock_timeout, Arc::clone(&event_bus)),
            schedule: WeeklySchedule::new(pool.clone(), lock_timeout),
            readiness: ReadinessEvaluator::new(pool.clone()),
            coordinator: AssignmentCoordinator::new(
                pool.clone(),
                lock_timeout,
                Arc::clone(&event_bus),
            ),
            rejections: RejectionLedger::new(pool, lock_timeout, event_bus),
        }
    }
}
