//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::store::{CartStore, FileStorage, StorageBackend, WishlistStore};
use crate::woocommerce::WooClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the API client and the persisted stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    woo: WooClient,
    cart: CartStore,
    wishlist: WishlistStore,
}

impl AppState {
    /// Create a new application state with file-backed stores under the
    /// configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn new(config: StorefrontConfig) -> std::io::Result<Self> {
        let backend: Arc<dyn StorageBackend> = Arc::new(FileStorage::new(&config.data_dir)?);
        Ok(Self::with_backend(config, backend))
    }

    /// Create application state over an explicit storage backend.
    #[must_use]
    pub fn with_backend(config: StorefrontConfig, backend: Arc<dyn StorageBackend>) -> Self {
        let woo = WooClient::new(&config.woocommerce);
        let cart = CartStore::new(Arc::clone(&backend));
        let wishlist = WishlistStore::new(backend);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                woo,
                cart,
                wishlist,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the WooCommerce API client.
    #[must_use]
    pub fn woo(&self) -> &WooClient {
        &self.inner.woo
    }

    /// Get a reference to the persisted cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the persisted wishlist store.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }
}
