//! Session-scoped shopping cart.
//!
//! A [`Cart`] maps product ids to positive quantities. Carts are not tied to
//! the catalog: product ids are opaque keys and are never checked for
//! existence. Storage is abstracted behind [`CartStore`] so the
//! [`CartManager`] itself holds no state beyond the injected store.
//!
//! Mutations are read-modify-write against the store. Two concurrent
//! mutations for the same session may race and lose an update; callers are
//! expected to issue at most one mutation per session at a time.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, FieldErrors};
use crate::types::{DbId, SessionId};

/// One line of a cart as exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: DbId,
    pub quantity: u32,
}

/// Product id -> quantity. Every stored quantity is at least 1.
///
/// Serializes as a JSON object keyed by the product id, e.g. `{"7": 5}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<DbId, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn quantity_of(&self, product_id: DbId) -> Option<u32> {
        self.items.get(&product_id).copied()
    }

    /// Entries in ascending product id order.
    pub fn entries(&self) -> Vec<CartEntry> {
        self.items
            .iter()
            .map(|(&product_id, &quantity)| CartEntry {
                product_id,
                quantity,
            })
            .collect()
    }

    /// Add `quantity` units of a product, accumulating onto any existing line.
    ///
    /// Returns the new quantity for the product. The cart is left untouched
    /// when the sum would overflow.
    pub fn add(&mut self, product_id: DbId, quantity: u32) -> Result<u32, CoreError> {
        let current = self.items.get(&product_id).copied().unwrap_or(0);
        let total = current.checked_add(quantity).ok_or_else(|| {
            CoreError::invalid_field("quantity", "Resulting cart quantity is too large.")
        })?;
        self.items.insert(product_id, total);
        Ok(total)
    }

    /// Remove a product line entirely. Returns the removed quantity, if any.
    pub fn remove(&mut self, product_id: DbId) -> Option<u32> {
        self.items.remove(&product_id)
    }
}

/// Validate raw cart input, returning the quantity as an unsigned count.
///
/// Both fields are checked so the caller sees every problem at once.
pub fn validate_cart_item(product_id: DbId, quantity: i64) -> Result<u32, CoreError> {
    let mut fields = FieldErrors::new();

    if product_id < 1 {
        fields.insert(
            "product_id".into(),
            vec!["Ensure this value is a valid product identifier.".into()],
        );
    }

    let checked = if quantity < 1 {
        fields.insert(
            "quantity".into(),
            vec!["Ensure this value is greater than or equal to 1.".into()],
        );
        None
    } else if let Ok(q) = u32::try_from(quantity) {
        Some(q)
    } else {
        fields.insert(
            "quantity".into(),
            vec![format!(
                "Ensure this value is less than or equal to {}.",
                u32::MAX
            )],
        );
        None
    };

    match checked {
        Some(q) if fields.is_empty() => Ok(q),
        _ => Err(CoreError::InvalidFields(fields)),
    }
}

/// Session-keyed persistence for carts.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Load the cart for a session, `None` if the session has none yet.
    async fn load(&self, session: SessionId) -> Result<Option<Cart>, CoreError>;

    /// Persist the cart for a session, replacing whatever was stored.
    async fn save(&self, session: SessionId, cart: &Cart) -> Result<(), CoreError>;
}

/// Applies cart operations on behalf of a session.
///
/// Cheap to clone; all state lives in the injected [`CartStore`].
#[derive(Clone)]
pub struct CartManager {
    store: Arc<dyn CartStore>,
}

impl CartManager {
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self { store }
    }

    async fn load(&self, session: SessionId) -> Result<Cart, CoreError> {
        Ok(self.store.load(session).await?.unwrap_or_default())
    }

    /// Current cart contents; empty if the session has no cart yet.
    pub async fn get_cart(&self, session: SessionId) -> Result<Vec<CartEntry>, CoreError> {
        Ok(self.load(session).await?.entries())
    }

    /// Add a product to the cart, accumulating quantities for repeat adds.
    pub async fn add_item(
        &self,
        session: SessionId,
        product_id: DbId,
        quantity: i64,
    ) -> Result<Vec<CartEntry>, CoreError> {
        let quantity = validate_cart_item(product_id, quantity)?;

        let mut cart = self.load(session).await?;
        cart.add(product_id, quantity)?;
        self.store.save(session, &cart).await?;

        Ok(cart.entries())
    }

    /// Drop a product line from the cart. Fails if the product is absent.
    pub async fn remove_item(
        &self,
        session: SessionId,
        product_id: DbId,
    ) -> Result<Vec<CartEntry>, CoreError> {
        let mut cart = self.load(session).await?;
        if cart.remove(product_id).is_none() {
            return Err(CoreError::NotInCart { product_id });
        }
        self.store.save(session, &cart).await?;

        Ok(cart.entries())
    }

    /// Empty the cart. Always succeeds unless the store is unavailable.
    pub async fn clear_cart(&self, session: SessionId) -> Result<(), CoreError> {
        self.store.save(session, &Cart::new()).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use tokio::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct TestStore {
        carts: Mutex<HashMap<SessionId, Cart>>,
        saves: Mutex<usize>,
    }

    #[async_trait]
    impl CartStore for TestStore {
        async fn load(&self, session: SessionId) -> Result<Option<Cart>, CoreError> {
            Ok(self.carts.lock().await.get(&session).cloned())
        }

        async fn save(&self, session: SessionId, cart: &Cart) -> Result<(), CoreError> {
            self.carts.lock().await.insert(session, cart.clone());
            *self.saves.lock().await += 1;
            Ok(())
        }
    }

    fn manager() -> (CartManager, Arc<TestStore>) {
        let store = Arc::new(TestStore::default());
        (CartManager::new(store.clone()), store)
    }

    fn entry(product_id: DbId, quantity: u32) -> CartEntry {
        CartEntry {
            product_id,
            quantity,
        }
    }

    #[tokio::test]
    async fn empty_session_has_empty_cart() {
        let (carts, _) = manager();
        let items = carts.get_cart(SessionId::generate()).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn repeated_adds_accumulate() {
        let (carts, _) = manager();
        let session = SessionId::generate();

        carts.add_item(session, 7, 2).await.unwrap();
        let items = carts.add_item(session, 7, 3).await.unwrap();

        assert_eq!(items, vec![entry(7, 5)]);
        assert_eq!(carts.get_cart(session).await.unwrap(), vec![entry(7, 5)]);
    }

    #[tokio::test]
    async fn add_returns_whole_cart() {
        let (carts, _) = manager();
        let session = SessionId::generate();

        carts.add_item(session, 3, 1).await.unwrap();
        let items = carts.add_item(session, 1, 4).await.unwrap();

        assert_eq!(items, vec![entry(1, 4), entry(3, 1)]);
    }

    #[tokio::test]
    async fn zero_and_negative_quantities_are_rejected_without_side_effects() {
        let (carts, store) = manager();
        let session = SessionId::generate();
        carts.add_item(session, 7, 1).await.unwrap();
        let saves_before = *store.saves.lock().await;

        for bad in [0, -1] {
            let err = carts.add_item(session, 7, bad).await.unwrap_err();
            assert_matches!(err, CoreError::InvalidFields(ref f) if f.contains_key("quantity"));
        }

        assert_eq!(carts.get_cart(session).await.unwrap(), vec![entry(7, 1)]);
        assert_eq!(*store.saves.lock().await, saves_before);
    }

    #[tokio::test]
    async fn invalid_product_id_is_rejected() {
        let (carts, _) = manager();
        let err = carts
            .add_item(SessionId::generate(), 0, 1)
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(ref f) if f.contains_key("product_id"));
    }

    #[tokio::test]
    async fn both_bad_fields_are_reported_together() {
        let (carts, _) = manager();
        let err = carts
            .add_item(SessionId::generate(), -4, -4)
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(ref f) if f.len() == 2);
    }

    #[tokio::test]
    async fn overflowing_quantity_is_rejected_and_cart_kept() {
        let (carts, _) = manager();
        let session = SessionId::generate();
        carts
            .add_item(session, 9, i64::from(u32::MAX))
            .await
            .unwrap();

        let err = carts.add_item(session, 9, 1).await.unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(_));
        assert_eq!(
            carts.get_cart(session).await.unwrap(),
            vec![entry(9, u32::MAX)]
        );
    }

    #[tokio::test]
    async fn quantity_beyond_u32_is_rejected() {
        let (carts, _) = manager();
        let err = carts
            .add_item(SessionId::generate(), 1, i64::from(u32::MAX) + 1)
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(ref f) if f.contains_key("quantity"));
    }

    #[tokio::test]
    async fn remove_deletes_the_whole_line() {
        let (carts, _) = manager();
        let session = SessionId::generate();
        carts.add_item(session, 7, 5).await.unwrap();
        carts.add_item(session, 8, 1).await.unwrap();

        let items = carts.remove_item(session, 7).await.unwrap();

        assert_eq!(items, vec![entry(8, 1)]);
    }

    #[tokio::test]
    async fn removing_absent_product_is_not_found_and_cart_unchanged() {
        let (carts, _) = manager();
        let session = SessionId::generate();
        carts.add_item(session, 8, 2).await.unwrap();

        let err = carts.remove_item(session, 7).await.unwrap_err();

        assert_matches!(err, CoreError::NotInCart { product_id: 7 });
        assert_eq!(carts.get_cart(session).await.unwrap(), vec![entry(8, 2)]);
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let (carts, _) = manager();
        let session = SessionId::generate();
        carts.add_item(session, 1, 1).await.unwrap();
        carts.add_item(session, 2, 2).await.unwrap();

        carts.clear_cart(session).await.unwrap();
        carts.clear_cart(session).await.unwrap();

        assert!(carts.get_cart(session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sessions_do_not_share_carts() {
        let (carts, _) = manager();
        let a = SessionId::generate();
        let b = SessionId::generate();

        carts.add_item(a, 1, 1).await.unwrap();

        assert!(carts.get_cart(b).await.unwrap().is_empty());
    }

    #[test]
    fn cart_serializes_as_id_keyed_object() {
        let mut cart = Cart::new();
        cart.add(7, 5).unwrap();
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json, serde_json::json!({ "7": 5 }));

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back.quantity_of(7), Some(5));
    }
}
