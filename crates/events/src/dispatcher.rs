//! Background push dispatcher.
//!
//! Subscribes to the [`EventBus`](crate::bus::EventBus) and, for every
//! `notification.created` event, makes one delivery attempt through the
//! [`PushGateway`] and writes the outcome to the notification row. Without a
//! gateway the notification is marked `SKIPPED`. The loop ends when the bus
//! is dropped.

use parish_core::notification::{DeliveryStatus, NOTIFICATION_CREATED};
use parish_db::repositories::NotificationRepo;
use sqlx::PgPool;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::bus::PlatformEvent;
use crate::push::{PushError, PushGateway, PushMessage};

pub struct PushDispatcher {
    pool: PgPool,
    gateway: Option<PushGateway>,
}

impl PushDispatcher {
    pub fn new(pool: PgPool, gateway: Option<PushGateway>) -> Self {
        Self { pool, gateway }
    }

    /// Consume events until the channel closes.
    pub async fn run(self, mut rx: broadcast::Receiver<PlatformEvent>) {
        tracing::info!(
            gateway = self.gateway.as_ref().map(PushGateway::url),
            "Push dispatcher started"
        );
        loop {
            match rx.recv().await {
                Ok(event) => self.handle(&event).await,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Push dispatcher lagged, events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
        tracing::info!("Push dispatcher stopped");
    }

    async fn handle(&self, event: &PlatformEvent) {
        let Some(message) = message_from_event(event) else {
            return;
        };

        let status = match &self.gateway {
            None => DeliveryStatus::Skipped,
            Some(gateway) => delivery_outcome(&gateway.send(&message).await),
        };

        if status == DeliveryStatus::Failed {
            tracing::warn!(notification_id = message.notification_id, "Push delivery failed");
        }

        if let Err(e) =
            NotificationRepo::set_delivery_status(&self.pool, message.notification_id, status).await
        {
            tracing::error!(
                notification_id = message.notification_id,
                error = %e,
                "Failed to record push delivery status"
            );
        }
    }
}

/// Build the gateway message for a `notification.created` event. Other
/// events, and events missing a source id, are ignored.
pub fn message_from_event(event: &PlatformEvent) -> Option<PushMessage> {
    if event.event_type != NOTIFICATION_CREATED {
        return None;
    }
    let notification_id = event.source_entity_id?;
    let text = |key: &str| event.payload[key].as_str().map(str::to_string);

    Some(PushMessage {
        notification_id,
        title: text("title").unwrap_or_default(),
        body: text("body").unwrap_or_default(),
        audience: text("audience").unwrap_or_else(|| "ALL".to_string()),
        target_role: text("target_role"),
    })
}

fn delivery_outcome(result: &Result<(), PushError>) -> DeliveryStatus {
    match result {
        Ok(()) => DeliveryStatus::Sent,
        Err(_) => DeliveryStatus::Failed,
    }
}
