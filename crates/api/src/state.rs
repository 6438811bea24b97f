use std::sync::Arc;

use bazaar_core::cart::{CartManager, CartStore};
use bazaar_db::store::{CatalogStore, CredentialStore, OrderStore, StoreHealth};
use bazaar_events::ProductHook;

use crate::auth::AuthGateway;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub catalog: Arc<dyn CatalogStore>,
    pub orders: Arc<dyn OrderStore>,
    pub carts: CartManager,
    pub auth: AuthGateway,
    /// Invoked after a product is stored.
    pub product_hook: Arc<dyn ProductHook>,
    pub health: Arc<dyn StoreHealth>,
}

impl AppState {
    /// Wire every store seam to one backing store.
    pub fn new<S>(config: ServerConfig, store: Arc<S>, product_hook: Arc<dyn ProductHook>) -> Self
    where
        S: CatalogStore + OrderStore + CredentialStore + CartStore + StoreHealth + 'static,
    {
        let credentials: Arc<dyn CredentialStore> = store.clone();
        let carts: Arc<dyn CartStore> = store.clone();
        let auth = AuthGateway::new(credentials, config.jwt.clone());

        Self {
            config: Arc::new(config),
            catalog: store.clone(),
            orders: store.clone(),
            carts: CartManager::new(carts),
            auth,
            product_hook,
            health: store,
        }
    }
}
