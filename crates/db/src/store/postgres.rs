//! PostgreSQL-backed store delegating to the repositories.

use async_trait::async_trait;
use bazaar_core::cart::{Cart, CartStore};
use bazaar_core::error::CoreError;
use bazaar_core::pagination::Page;
use bazaar_core::types::{DbId, SessionId};
use chrono::Utc;

use super::{CatalogStore, CredentialStore, OrderStore, StoreHealth, StoreResult};
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::order::{CreateOrder, Order};
use crate::models::product::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::models::user::{CreateUser, User};
use crate::repositories::{CartSessionRepo, CategoryRepo, OrderRepo, ProductRepo, UserRepo};
use crate::DbPool;

/// Default idle lifetime of a cart session.
pub const DEFAULT_CART_TTL_DAYS: i64 = 14;

/// Store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
    cart_ttl: chrono::Duration,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            cart_ttl: chrono::Duration::days(DEFAULT_CART_TTL_DAYS),
        }
    }

    /// Carts idle for longer than `ttl` are treated as gone.
    pub fn with_cart_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.cart_ttl = ttl;
        self
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Delete carts that have been idle for longer than the TTL.
    pub async fn sweep_idle_carts(&self) -> StoreResult<u64> {
        let cutoff = Utc::now() - self.cart_ttl;
        Ok(CartSessionRepo::delete_idle(&self.pool, cutoff).await?)
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn create_category(&self, input: &CreateCategory) -> StoreResult<Category> {
        Ok(CategoryRepo::create(&self.pool, input).await?)
    }

    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>> {
        Ok(CategoryRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_categories(&self, page: Page) -> StoreResult<Vec<Category>> {
        Ok(CategoryRepo::list(&self.pool, page).await?)
    }

    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> StoreResult<Option<Category>> {
        Ok(CategoryRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_category(&self, id: DbId) -> StoreResult<bool> {
        Ok(CategoryRepo::delete(&self.pool, id).await?)
    }

    async fn create_product(&self, input: &CreateProduct) -> StoreResult<Product> {
        Ok(ProductRepo::create(&self.pool, input).await?)
    }

    async fn find_product(&self, id: DbId) -> StoreResult<Option<Product>> {
        Ok(ProductRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
        page: Page,
    ) -> StoreResult<Vec<Product>> {
        Ok(ProductRepo::list(&self.pool, filter, page).await?)
    }

    async fn update_product(
        &self,
        id: DbId,
        input: &UpdateProduct,
    ) -> StoreResult<Option<Product>> {
        Ok(ProductRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_product(&self, id: DbId) -> StoreResult<bool> {
        Ok(ProductRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn create_order(&self, input: &CreateOrder) -> StoreResult<Order> {
        Ok(OrderRepo::create(&self.pool, input).await?)
    }

    async fn find_order(&self, id: DbId) -> StoreResult<Option<Order>> {
        Ok(OrderRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_orders(&self, page: Page) -> StoreResult<Vec<Order>> {
        Ok(OrderRepo::list(&self.pool, page).await?)
    }

    async fn delete_order(&self, id: DbId) -> StoreResult<bool> {
        Ok(OrderRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }
}

#[async_trait]
impl StoreHealth for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

fn cart_storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Cart session storage failed");
    CoreError::Internal("Cart session storage is unavailable".into())
}

#[async_trait]
impl CartStore for PgStore {
    async fn load(&self, session: SessionId) -> Result<Option<Cart>, CoreError> {
        let fresh_since = Utc::now() - self.cart_ttl;
        CartSessionRepo::find(&self.pool, session, fresh_since)
            .await
            .map_err(cart_storage_error)
    }

    async fn save(&self, session: SessionId, cart: &Cart) -> Result<(), CoreError> {
        CartSessionRepo::upsert(&self.pool, session, cart)
            .await
            .map_err(cart_storage_error)
    }
}
