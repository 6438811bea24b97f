//! Repository for the `products` table.

use bazaar_core::pagination::Page;
use bazaar_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, ProductFilter, UpdateProduct};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, image, description, price, category_id, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (name, image, description, price, category_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(input.name.trim())
            .bind(input.image.is_some())
            .bind(input.image.as_ref().and_then(|image| image.as_deref()))
            .bind(&input.description)
            .bind(input.price)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of products in ID order, optionally within one category.
    pub async fn list(
        pool: &PgPool,
        filter: &ProductFilter,
        page: Page,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE ($1::BIGINT IS NULL OR category_id = $1)
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(filter.category_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Update a product. Only non-`None` fields in `input` are applied;
    /// `image: Some(None)` clears the image.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                image = CASE WHEN $3 THEN $4 ELSE image END,
                description = COALESCE($5, description),
                price = COALESCE($6, price),
                category_id = COALESCE($7, category_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.image)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.category_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
