//! Store seams consumed by the API layer.
//!
//! Handlers never talk to sqlx directly; they go through these traits so the
//! backing storage can be PostgreSQL ([`PgStore`]) or process memory
//! ([`MemoryStore`]). Both implement every trait, including the core
//! [`CartStore`](bazaar_core::cart::CartStore).

use async_trait::async_trait;
use bazaar_core::pagination::Page;
use bazaar_core::types::DbId;

use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::order::{CreateOrder, Order};
use crate::models::product::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::models::user::{CreateUser, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// PostgreSQL SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Storage failure, with constraint violations pulled out of the raw driver error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("Foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) => return StoreError::UniqueViolation { constraint },
                Some(PG_FOREIGN_KEY_VIOLATION) => {
                    return StoreError::ForeignKeyViolation { constraint }
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Categories and products.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn create_category(&self, input: &CreateCategory) -> StoreResult<Category>;
    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>>;
    async fn list_categories(&self, page: Page) -> StoreResult<Vec<Category>>;
    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> StoreResult<Option<Category>>;
    /// Deleting a category also deletes every product in it.
    async fn delete_category(&self, id: DbId) -> StoreResult<bool>;

    async fn create_product(&self, input: &CreateProduct) -> StoreResult<Product>;
    async fn find_product(&self, id: DbId) -> StoreResult<Option<Product>>;
    async fn list_products(&self, filter: &ProductFilter, page: Page)
        -> StoreResult<Vec<Product>>;
    async fn update_product(&self, id: DbId, input: &UpdateProduct)
        -> StoreResult<Option<Product>>;
    async fn delete_product(&self, id: DbId) -> StoreResult<bool>;
}

/// Orders. Write-once: there is deliberately no update.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(&self, input: &CreateOrder) -> StoreResult<Order>;
    async fn find_order(&self, id: DbId) -> StoreResult<Option<Order>>;
    async fn list_orders(&self, page: Page) -> StoreResult<Vec<Order>>;
    async fn delete_order(&self, id: DbId) -> StoreResult<bool>;
}

/// User identities and password hashes.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fails with [`StoreError::UniqueViolation`] if the username is taken.
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;
    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
}

/// Liveness probe for the backing storage.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;
}
