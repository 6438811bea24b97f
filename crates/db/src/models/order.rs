//! Order entity model and DTOs.
//!
//! Orders are write-once: there is no update DTO.

use bazaar_core::types::{DbId, Timestamp};
use bazaar_core::validation::validate_price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An order row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    pub total_price: Decimal,
    /// Set by the store when the order is written; never changes afterwards.
    pub created_at: Timestamp,
}

/// DTO for creating a new order.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrder {
    #[validate(range(min = 1, message = "Ensure this value is a valid user identifier."))]
    pub user_id: DbId,
    #[validate(custom(function = "validate_price"))]
    pub total_price: Decimal,
}
