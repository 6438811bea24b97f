//! In-process store for local development and tests.
//!
//! Mirrors the PostgreSQL schema's constraints (unique names, foreign keys,
//! cascade delete) so callers observe the same errors as against a real
//! database. Everything lives behind one `RwLock`, so each call is atomic.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use bazaar_core::cart::{Cart, CartStore};
use bazaar_core::error::CoreError;
use bazaar_core::pagination::Page;
use bazaar_core::types::{DbId, SessionId};
use chrono::Utc;
use tokio::sync::RwLock;

use super::{CatalogStore, CredentialStore, OrderStore, StoreError, StoreHealth, StoreResult};
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::order::{CreateOrder, Order};
use crate::models::product::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::models::user::{CreateUser, User};

#[derive(Default)]
struct Tables {
    last_id: DbId,
    categories: BTreeMap<DbId, Category>,
    products: BTreeMap<DbId, Product>,
    orders: BTreeMap<DbId, Order>,
    users: BTreeMap<DbId, User>,
    carts: HashMap<SessionId, Cart>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn ensure_unique_category_name(&self, name: &str, except: Option<DbId>) -> StoreResult<()> {
        let taken = self
            .categories
            .values()
            .any(|c| c.name == name && Some(c.id) != except);
        if taken {
            return Err(StoreError::UniqueViolation {
                constraint: "uq_categories_name".into(),
            });
        }
        Ok(())
    }

    fn ensure_category_exists(&self, id: DbId) -> StoreResult<()> {
        if !self.categories.contains_key(&id) {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "fk_products_category_id".into(),
            });
        }
        Ok(())
    }
}

fn paginate<T: Clone>(rows: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    // Page values are clamped non-negative, so the casts cannot wrap.
    rows.skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

/// Store holding every table in process memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn create_category(&self, input: &CreateCategory) -> StoreResult<Category> {
        let mut tables = self.tables.write().await;
        let name = input.name.trim().to_string();
        tables.ensure_unique_category_name(&name, None)?;

        let now = Utc::now();
        let category = Category {
            id: tables.next_id(),
            name,
            created_at: now,
            updated_at: now,
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn list_categories(&self, page: Page) -> StoreResult<Vec<Category>> {
        let tables = self.tables.read().await;
        Ok(paginate(tables.categories.values().cloned(), page))
    }

    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> StoreResult<Option<Category>> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&id) {
            return Ok(None);
        }
        let name = input.name.as_deref().map(str::trim);
        if let Some(name) = name {
            tables.ensure_unique_category_name(name, Some(id))?;
        }

        let category = tables.categories.get_mut(&id).map(|category| {
            if let Some(name) = name {
                category.name = name.to_string();
            }
            category.updated_at = Utc::now();
            category.clone()
        });
        Ok(category)
    }

    async fn delete_category(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.categories.remove(&id).is_none() {
            return Ok(false);
        }
        tables.products.retain(|_, p| p.category_id != id);
        Ok(true)
    }

    async fn create_product(&self, input: &CreateProduct) -> StoreResult<Product> {
        let mut tables = self.tables.write().await;
        tables.ensure_category_exists(input.category_id)?;

        let now = Utc::now();
        let product = Product {
            id: tables.next_id(),
            name: input.name.trim().to_string(),
            image: input.image.clone(),
            description: input.description.clone(),
            price: input.price,
            category_id: input.category_id,
            created_at: now,
            updated_at: now,
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_product(&self, id: DbId) -> StoreResult<Option<Product>> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
        page: Page,
    ) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().await;
        let rows = tables
            .products
            .values()
            .filter(|p| filter.category_id.map_or(true, |c| p.category_id == c))
            .cloned();
        Ok(paginate(rows, page))
    }

    async fn update_product(
        &self,
        id: DbId,
        input: &UpdateProduct,
    ) -> StoreResult<Option<Product>> {
        let mut tables = self.tables.write().await;
        if !tables.products.contains_key(&id) {
            return Ok(None);
        }
        if let Some(category_id) = input.category_id {
            tables.ensure_category_exists(category_id)?;
        }

        let product = tables.products.get_mut(&id).map(|product| {
            if let Some(name) = &input.name {
                product.name = name.trim().to_string();
            }
            if let Some(image) = &input.image {
                product.image = image.clone();
            }
            if let Some(description) = &input.description {
                product.description = description.clone();
            }
            if let Some(price) = input.price {
                product.price = price;
            }
            if let Some(category_id) = input.category_id {
                product.category_id = category_id;
            }
            product.updated_at = Utc::now();
            product.clone()
        });
        Ok(product)
    }

    async fn delete_product(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.products.remove(&id).is_some())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create_order(&self, input: &CreateOrder) -> StoreResult<Order> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&input.user_id) {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "fk_orders_user_id".into(),
            });
        }

        let order = Order {
            id: tables.next_id(),
            user_id: input.user_id,
            total_price: input.total_price,
            created_at: Utc::now(),
        };
        tables.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_order(&self, id: DbId) -> StoreResult<Option<Order>> {
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }

    async fn list_orders(&self, page: Page) -> StoreResult<Vec<Order>> {
        let tables = self.tables.read().await;
        // Ids are assigned monotonically, so reverse id order is newest first.
        Ok(paginate(tables.orders.values().rev().cloned(), page))
    }

    async fn delete_order(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.orders.remove(&id).is_some())
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == input.username) {
            return Err(StoreError::UniqueViolation {
                constraint: "uq_users_username".into(),
            });
        }

        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            username: input.username.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn load(&self, session: SessionId) -> Result<Option<Cart>, CoreError> {
        Ok(self.tables.read().await.carts.get(&session).cloned())
    }

    async fn save(&self, session: SessionId, cart: &Cart) -> Result<(), CoreError> {
        self.tables
            .write()
            .await
            .carts
            .insert(session, cart.clone());
        Ok(())
    }
}
