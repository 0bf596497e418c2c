#[macro_use]
mod literal;

pub mod assignment;
pub mod audit;
pub mod availability;
pub mod error;
pub mod readiness;
pub mod roles;
pub mod schedule;
pub mod technician;
pub mod time_off;
pub mod types;
