//! Event bus and notification plumbing for the storefront.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ProductHook`]: post-commit hook invoked after a product is stored.
//! - [`ProductNotifier`]: background subscriber that emails the store admin
//!   about new products.
//! - [`delivery`]: outbound channels (SMTP email).

pub mod bus;
pub mod delivery;
pub mod hook;
pub mod notifier;

pub use bus::{DomainEvent, EventBus};
pub use delivery::email::{EmailConfig, EmailDelivery, EmailError, Mailer};
pub use hook::{EventBusProductHook, ProductHook};
pub use notifier::ProductNotifier;
