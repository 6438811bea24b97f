//! Shared response bodies.

use bazaar_core::cart::CartEntry;
use serde::Serialize;

/// `{ "message": ... }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Cart contents, with an optional acknowledgement for mutations.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Vec<CartEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}
