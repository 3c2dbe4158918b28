//! Wishlist commands.
//!
//! Each command loads the stored wishlist, applies one change and writes it
//! back. Results are reported through `tracing`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use wishlist_core::{IdError, Product, WishlistEntryId};
use wishlist_storefront::storage::{FileStorage, StorageError};
use wishlist_storefront::wishlist::{AddOutcome, WishlistError, WishlistStore};

/// Errors a command can fail with.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Wishlist error: {0}")]
    Wishlist(#[from] WishlistError),
    #[error("Invalid id: {0}")]
    Id(#[from] IdError),
    #[error("Failed to read product file {path}: {source}")]
    ReadProduct {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid product file {path}: {source}")]
    ParseProduct {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("No wishlist entry with id {0}")]
    NotFound(WishlistEntryId),
}

/// Open the wishlist stored under `key` in `data_dir`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn open_store(data_dir: &Path, key: &str) -> Result<WishlistStore, CommandError> {
    let storage = FileStorage::open(data_dir)?;
    Ok(WishlistStore::load(Arc::new(storage), key))
}

/// Log every entry in order.
pub fn list(store: &WishlistStore) {
    if store.is_empty() {
        tracing::info!("Your Wishlist is Empty");
        return;
    }

    for entry in store.entries() {
        let added = entry
            .added_on
            .map_or_else(String::new, |date| date.to_string());
        tracing::info!(
            id = %entry.id,
            name = %entry.name,
            color = %entry.color,
            size = %entry.size,
            price = %entry.price,
            added = %added,
            "entry"
        );
    }
    tracing::info!(count = store.len(), "Wishlist listed");
}

/// Save the product described by the JSON file at `product_path`.
///
/// # Errors
///
/// Returns an error if the product file cannot be read or parsed, no size is
/// given, or the wishlist cannot be written.
pub fn add(
    store: &mut WishlistStore,
    product_path: &Path,
    color_index: usize,
    size: Option<&str>,
) -> Result<(), CommandError> {
    let product = read_product(product_path)?;
    let today = chrono::Local::now().date_naive();

    match store.try_add(&product, color_index, size, today)? {
        AddOutcome::Added(id) => {
            tracing::info!(id = %id, "Added to your wishlist!");
        }
        AddOutcome::AlreadyPresent(id) => {
            tracing::info!(id = %id, "This item is already in your wishlist");
        }
    }
    Ok(())
}

/// Remove the entry with `id`.
///
/// # Errors
///
/// Returns an error if `id` is blank, not present, or the write fails.
pub fn remove(store: &mut WishlistStore, id: &str) -> Result<(), CommandError> {
    let id = WishlistEntryId::parse(id)?;
    if !store.try_remove(&id)? {
        return Err(CommandError::NotFound(id));
    }
    tracing::info!(id = %id, remaining = store.len(), "Removed from wishlist");
    Ok(())
}

/// Change the size of the entry with `id`.
///
/// # Errors
///
/// Returns an error if `id` is blank or not present, `size` is blank, or the
/// write fails.
pub fn set_size(store: &mut WishlistStore, id: &str, size: &str) -> Result<(), CommandError> {
    let id = WishlistEntryId::parse(id)?;
    let size = size.trim();
    if size.is_empty() {
        return Err(WishlistError::MissingSize.into());
    }
    if !store.try_update_size(&id, size)? {
        return Err(CommandError::NotFound(id));
    }
    tracing::info!(id = %id, size, "Size updated!");
    Ok(())
}

/// Remove every entry.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn clear(store: &mut WishlistStore) -> Result<(), CommandError> {
    let removed = store.len();
    store.try_clear()?;
    tracing::info!(removed, "Wishlist cleared");
    Ok(())
}

fn read_product(path: &Path) -> Result<Product, CommandError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CommandError::ReadProduct {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CommandError::ParseProduct {
        path: path.to_path_buf(),
        source,
    })
}
