//! Dispatch event bus and best-effort notification fan-out.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`]: the event envelope published after a commit.
//! - [`AdminNotifier`]: background task turning selected events into
//!   admin inbox rows. Its failures never reach the publishing request.

pub mod bus;
pub mod notifier;

pub use bus::{event_types, DomainEvent, EventBus};
pub use notifier::AdminNotifier;
