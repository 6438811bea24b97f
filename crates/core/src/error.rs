use std::collections::BTreeMap;

use crate::types::DbId;

/// Field name -> human-readable problems with that field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Item not found in cart: product {product_id}")]
    NotInCart { product_id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed for fields: {}", field_list(.0))]
    InvalidFields(FieldErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Login failed. Deliberately carries no detail about which check failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Single-field validation failure.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.into(), vec![message.into()]);
        CoreError::InvalidFields(fields)
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", e.code))
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
        CoreError::InvalidFields(fields)
    }
}

fn field_list(fields: &FieldErrors) -> String {
    fields.keys().cloned().collect::<Vec<_>>().join(", ")
}
