//! Outbound delivery channels for notifications.

pub mod email;
