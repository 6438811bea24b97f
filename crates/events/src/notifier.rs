//! Emails the store admin whenever a product is created.
//!
//! [`ProductNotifier`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and sends one email per `product.created` event. Delivery failures are
//! logged and otherwise ignored; the request that created the product has
//! already completed by the time the email goes out.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::bus::{DomainEvent, PRODUCT_CREATED};
use crate::delivery::email::Mailer;

/// Recipient used when `ADMIN_NOTIFY_EMAIL` is not set.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@ecommerce.com";

pub const NEW_PRODUCT_SUBJECT: &str = "New Product Added";

pub struct ProductNotifier {
    mailer: Arc<dyn Mailer>,
    admin_email: String,
}

impl ProductNotifier {
    pub fn new(mailer: Arc<dyn Mailer>, admin_email: impl Into<String>) -> Self {
        Self {
            mailer,
            admin_email: admin_email.into(),
        }
    }

    /// Admin address from `ADMIN_NOTIFY_EMAIL`, or the default.
    pub fn admin_email_from_env() -> String {
        std::env::var("ADMIN_NOTIFY_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string())
    }

    /// Run until `cancel` fires or the bus is dropped.
    pub async fn run(
        self,
        mut receiver: broadcast::Receiver<DomainEvent>,
        cancel: CancellationToken,
    ) {
        tracing::info!(to = %self.admin_email, "Product notifier started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Product notifier stopping");
                    break;
                }
                received = receiver.recv() => match received {
                    Ok(event) => self.handle(&event).await,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Product notifier lagged, some emails were not sent");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, product notifier shutting down");
                        break;
                    }
                },
            }
        }
    }

    async fn handle(&self, event: &DomainEvent) {
        if event.event_type != PRODUCT_CREATED {
            return;
        }
        let name = event.payload["name"].as_str().unwrap_or_default();
        let body = format!("A new product '{name}' has been added.");

        if let Err(e) = self
            .mailer
            .send(&self.admin_email, NEW_PRODUCT_SUBJECT, &body)
            .await
        {
            tracing::error!(
                error = %e,
                product_id = ?event.source_entity_id,
                "Failed to send new product notification"
            );
        }
    }
}
