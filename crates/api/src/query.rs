//! Shared query parameter types for API handlers.

use bazaar_core::pagination::Page;
use bazaar_core::types::DbId;
use bazaar_db::models::product::ProductFilter;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped by [`Page::new`], so out-of-range input never errors.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// Query parameters for `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub category_id: Option<DbId>,
}

impl ProductListParams {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }

    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            category_id: self.category_id,
        }
    }
}
