//! Repository for the `orders` table.

use bazaar_core::pagination::Page;
use bazaar_core::types::DbId;
use sqlx::PgPool;

use crate::models::order::{CreateOrder, Order};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, total_price, created_at";

/// Provides create/read/delete operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order. `created_at` is assigned by the database.
    pub async fn create(pool: &PgPool, input: &CreateOrder) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders (user_id, total_price)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(input.user_id)
            .bind(input.total_price)
            .fetch_one(pool)
            .await
    }

    /// Find an order by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of orders, newest first.
    pub async fn list(pool: &PgPool, page: Page) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Delete an order by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
