//! Admin inbox fan-out.
//!
//! [`AdminNotifier`] listens on the bus and writes an `admin_notifications`
//! row for every technician-initiated time-off request. It runs as its own
//! task: failures are logged and discarded and never propagate to the
//! request that published the event.

use dispatch_core::roles::ActorRole;
use dispatch_core::types::DbId;
use dispatch_db::models::notification::{AdminNotification, CreateAdminNotification};
use dispatch_db::repositories::AdminNotificationRepo;
use dispatch_db::DbPool;
use serde::Deserialize;
use tokio::sync::broadcast;

use crate::bus::{event_types, DomainEvent};

/// Notification kind stored for new time-off requests.
pub const KIND_TIME_OFF_REQUESTED: &str = "time_off_requested";

/// Payload carried by `time_off.created` events.
#[derive(Debug, Deserialize)]
struct TimeOffCreatedPayload {
    technician_id: DbId,
    entry_type: String,
    start_date: String,
    end_date: String,
    reason: String,
}

/// Background service writing admin inbox notifications.
pub struct AdminNotifier;

impl AdminNotifier {
    /// Run until the bus is dropped.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::handle(&pool, &event).await {
                        tracing::warn!(
                            error = %e,
                            event_type = %event.event_type,
                            "Admin notification failed, discarding"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Admin notifier lagged, notifications dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, admin notifier shutting down");
                    break;
                }
            }
        }
    }

    /// Process one event. Returns `Ok(None)` for events that need no
    /// notification.
    pub async fn handle(
        pool: &DbPool,
        event: &DomainEvent,
    ) -> Result<Option<AdminNotification>, sqlx::Error> {
        let Some(input) = Self::notification_for(event) else {
            return Ok(None);
        };
        let row = AdminNotificationRepo::create(pool, &input).await?;
        tracing::debug!(notification_id = row.id, kind = %row.kind, "Admin notified");
        Ok(Some(row))
    }

    /// Map an event to the notification it should raise, if any.
    ///
    /// Only technician self-service requests are surfaced; an admin
    /// creating time off does not notify the admin inbox.
    pub fn notification_for(event: &DomainEvent) -> Option<CreateAdminNotification> {
        if event.event_type != event_types::TIME_OFF_CREATED {
            return None;
        }
        if event.actor.map(|a| a.role) != Some(ActorRole::Technician) {
            return None;
        }

        let payload: TimeOffCreatedPayload = match serde_json::from_value(event.payload.clone()) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed time_off.created payload");
                return None;
            }
        };

        let range = if payload.start_date == payload.end_date {
            payload.start_date.clone()
        } else {
            format!("{} to {}", payload.start_date, payload.end_date)
        };

        Some(CreateAdminNotification {
            kind: KIND_TIME_OFF_REQUESTED.to_string(),
            title: "Technician time off".to_string(),
            body: format!(
                "Technician {} booked {} time off ({range}): {}",
                payload.technician_id, payload.entry_type, payload.reason
            ),
            technician_id: Some(payload.technician_id),
            entity_type: event.source_entity_type.clone(),
            entity_id: event.source_entity_id,
        })
    }
}
