//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

use serde::{Deserialize, Deserializer};

pub mod category;
pub mod order;
pub mod product;
pub mod user;

/// Deserialize a nullable patch field.
///
/// With `#[serde(default)]`, an absent key stays `None` while an explicit
/// `null` becomes `Some(None)`, so an update can clear the column.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
