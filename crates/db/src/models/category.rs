//! Category entity model and DTOs.

use bazaar_core::types::{DbId, Timestamp};
use bazaar_core::validation::validate_not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A category row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(
        length(min = 1, max = 255, message = "Ensure this field has 1 to 255 characters."),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
}

/// DTO for updating an existing category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(
        length(min = 1, max = 255, message = "Ensure this field has 1 to 255 characters."),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
}
