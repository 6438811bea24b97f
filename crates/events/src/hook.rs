//! Post-commit hooks fired by the catalog handlers.

use std::sync::Arc;

use bazaar_db::models::product::Product;

use crate::bus::{DomainEvent, EventBus, PRODUCT_CREATED};

/// Called once a product has been durably stored.
///
/// Implementations must not block; anything slow belongs on a background
/// subscriber.
pub trait ProductHook: Send + Sync {
    fn on_product_created(&self, product: &Product);
}

/// Publishes `product.created` on the event bus.
pub struct EventBusProductHook {
    bus: Arc<EventBus>,
}

impl EventBusProductHook {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self { bus }
    }
}

impl ProductHook for EventBusProductHook {
    fn on_product_created(&self, product: &Product) {
        tracing::debug!(product_id = product.id, "Publishing product.created");
        self.bus.publish(
            DomainEvent::new(PRODUCT_CREATED)
                .with_source("product", product.id)
                .with_payload(serde_json::json!({
                    "id": product.id,
                    "name": product.name,
                    "category_id": product.category_id,
                })),
        );
    }
}
