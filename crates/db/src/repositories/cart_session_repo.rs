//! Repository for the `cart_sessions` table.
//!
//! Each row holds one session's cart as a JSONB object keyed by product id.

use bazaar_core::cart::Cart;
use bazaar_core::types::{SessionId, Timestamp};
use sqlx::types::Json;
use sqlx::PgPool;

/// Load/save/expire session carts.
pub struct CartSessionRepo;

impl CartSessionRepo {
    /// Load the cart for a session if it was touched after `fresh_since`.
    pub async fn find(
        pool: &PgPool,
        session: SessionId,
        fresh_since: Timestamp,
    ) -> Result<Option<Cart>, sqlx::Error> {
        let row: Option<(Json<Cart>,)> = sqlx::query_as(
            "SELECT items FROM cart_sessions WHERE session_id = $1 AND updated_at > $2",
        )
        .bind(session.as_uuid())
        .bind(fresh_since)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(Json(cart),)| cart))
    }

    /// Insert or replace the cart for a session and bump `updated_at`.
    pub async fn upsert(pool: &PgPool, session: SessionId, cart: &Cart) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO cart_sessions (session_id, items, updated_at)
             VALUES ($1, $2, NOW())
             ON CONFLICT (session_id)
             DO UPDATE SET items = EXCLUDED.items, updated_at = NOW()",
        )
        .bind(session.as_uuid())
        .bind(Json(cart))
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete carts not touched since `cutoff`. Returns the number removed.
    pub async fn delete_idle(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_sessions WHERE updated_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
