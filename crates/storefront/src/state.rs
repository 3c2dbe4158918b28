//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::{Basket, CatalogClient, MemoryBasket, Notifications, ProductLookup};
use crate::storage::{FileStorage, KeyValueStorage, StorageError};
use crate::wishlist::{WishlistStore, WishlistView};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// wishlist controller and the basket it hands items to.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    wishlist: WishlistView,
    basket: Arc<dyn Basket>,
}

impl AppState {
    /// Assemble state from already-built collaborators.
    #[must_use]
    pub fn new(wishlist: WishlistView, basket: Arc<dyn Basket>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { wishlist, basket }),
        }
    }

    /// Build the production state: file storage, HTTP catalog and an
    /// in-memory basket.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, StorageError> {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::open(config.data_dir.clone())?);
        let store = WishlistStore::load(storage, config.storage_key.clone());
        let catalog: Arc<dyn ProductLookup> = Arc::new(CatalogClient::new(&config.catalog));
        let basket: Arc<dyn Basket> = Arc::new(MemoryBasket::new());

        let wishlist = WishlistView::new(store, catalog, basket.clone(), Notifications::new());
        Ok(Self::new(wishlist, basket))
    }

    /// Get the wishlist page controller.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistView {
        &self.inner.wishlist
    }

    /// Get the basket.
    #[must_use]
    pub fn basket(&self) -> &dyn Basket {
        self.inner.basket.as_ref()
    }
}
