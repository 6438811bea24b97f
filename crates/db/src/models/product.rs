//! Product entity model and DTOs.

use bazaar_core::types::{DbId, Timestamp};
use bazaar_core::validation::{validate_not_blank, validate_price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A product row from the `products` table.
///
/// `price` serializes as a decimal string (e.g. `"19.99"`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    /// URI of the product image. Uploading the image itself happens elsewhere.
    pub image: Option<String>,
    pub description: String,
    pub price: Decimal,
    pub category_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(
        length(min = 1, max = 255, message = "Ensure this field has 1 to 255 characters."),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[validate(url(message = "Enter a valid URL."))]
    pub image: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 1, message = "Ensure this value is a valid category identifier."))]
    pub category_id: DbId,
}

/// DTO for updating an existing product. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(
        length(min = 1, max = 255, message = "Ensure this field has 1 to 255 characters."),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    /// `null` clears the image; an absent key leaves it unchanged.
    #[serde(default, deserialize_with = "super::nullable")]
    #[validate(url(message = "Enter a valid URL."))]
    pub image: Option<Option<String>>,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    #[validate(range(min = 1, message = "Ensure this value is a valid category identifier."))]
    pub category_id: Option<DbId>,
}

/// Optional filters for product listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter {
    pub category_id: Option<DbId>,
}
