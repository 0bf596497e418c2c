//! Row models and DTOs.
//!
//! Status and enum columns are carried as the raw stored literal and parsed
//! into the closed `dispatch_core` enumerations through accessor methods.

pub mod audit;
pub mod coverage;
pub mod job;
pub mod job_rejection;
pub mod notification;
pub mod schedule;
pub mod technician;
pub mod time_off;
