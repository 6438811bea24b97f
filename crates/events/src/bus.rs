//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` between the request handlers
//! that publish and the background services that subscribe.

use bazaar_core::types::DbId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event type published after a product has been stored.
pub const PRODUCT_CREATED: &str = "product.created";

/// Something that happened in the store.
///
/// Built with [`DomainEvent::new`] plus [`with_source`](DomainEvent::with_source)
/// and [`with_payload`](DomainEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Dot-separated event name, e.g. `"product.created"`.
    pub event_type: String,
    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<DbId>,
    /// Event-specific data.
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

const DEFAULT_CAPACITY: usize = 256;

/// Fan-out event bus. Every subscriber sees every event published after it
/// subscribed.
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// Slow receivers that fall more than `capacity` events behind observe
    /// `RecvError::Lagged` and lose the oldest events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped if nobody is listening.
    pub fn publish(&self, event: DomainEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
