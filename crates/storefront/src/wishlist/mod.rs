//! Wishlist state and its page controller.
//!
//! [`WishlistStore`] owns the ordered entry list and mirrors it to durable
//! storage after every change. [`WishlistView`] sits on top of it and turns
//! user gestures into store calls, notices and navigation.

mod edit;
mod view;

pub use edit::{EditSession, EditState, EditTicket};
pub use view::{EditDialogView, EntryView, Navigation, WishlistPage, WishlistView};

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, error, warn};
use wishlist_core::{Product, WishlistEntry, WishlistEntryId};

use crate::storage::{KeyValueStorage, StorageError};

/// Storage key holding the serialized wishlist.
pub const DEFAULT_STORAGE_KEY: &str = "localWishlist";

/// Errors a wishlist mutation reports to its caller.
#[derive(Debug, Error)]
pub enum WishlistError {
    /// No size was chosen; the entry was not created.
    #[error("a size must be selected")]
    MissingSize,

    /// Snapshot could not be written.
    #[error("failed to persist wishlist: {0}")]
    Storage(#[from] StorageError),

    /// Snapshot could not be serialized.
    #[error("failed to serialize wishlist: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result of a successful [`WishlistStore::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was appended.
    Added(WishlistEntryId),
    /// An entry with the same id already exists; nothing changed.
    AlreadyPresent(WishlistEntryId),
}

/// The authoritative wishlist.
///
/// Created once per process with [`WishlistStore::load`] and owned by the
/// page controller; nothing else mutates the list.
pub struct WishlistStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    entries: Vec<WishlistEntry>,
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("key", &self.key)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl WishlistStore {
    /// Open the wishlist stored under `key`.
    ///
    /// Missing data starts an empty list. Unreadable or malformed data also
    /// starts an empty list; the failure is logged and never returned.
    pub fn load(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = read_snapshot(storage.as_ref(), &key);
        debug!(key = %key, count = entries.len(), "Loaded wishlist");

        Self {
            storage,
            key,
            entries,
        }
    }

    /// Write the full entry list to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn persist(&self) -> Result<(), WishlistError> {
        let json = serde_json::to_string(&self.entries)?;
        self.storage.set_item(&self.key, &json)?;
        Ok(())
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: &WishlistEntryId) -> Option<&WishlistEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save `product` in the given color and size.
    ///
    /// A failed storage write is logged; the entry stays in memory.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::MissingSize`] when `size` is absent or blank.
    /// The list is left unchanged in that case.
    pub fn add(
        &mut self,
        product: &Product,
        color_index: usize,
        size: Option<&str>,
        today: NaiveDate,
    ) -> Result<AddOutcome, WishlistError> {
        let outcome = self.insert(product, color_index, size, today)?;
        if matches!(outcome, AddOutcome::Added(_)) {
            self.commit();
        }
        Ok(outcome)
    }

    /// Like [`add`](Self::add), but a failed storage write is returned.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistError::MissingSize`] when `size` is absent or blank,
    /// or a storage error when the new entry could not be written. The entry
    /// stays in memory in the latter case.
    pub fn try_add(
        &mut self,
        product: &Product,
        color_index: usize,
        size: Option<&str>,
        today: NaiveDate,
    ) -> Result<AddOutcome, WishlistError> {
        let outcome = self.insert(product, color_index, size, today)?;
        if matches!(outcome, AddOutcome::Added(_)) {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Remove the entry with `id`. Absent ids are ignored.
    ///
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: &WishlistEntryId) -> bool {
        let removed = self.remove_entry(id);
        self.commit();
        removed
    }

    /// Like [`remove`](Self::remove), but a failed storage write is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list could not be written.
    pub fn try_remove(&mut self, id: &WishlistEntryId) -> Result<bool, WishlistError> {
        let removed = self.remove_entry(id);
        self.persist()?;
        Ok(removed)
    }

    /// Change the size of the entry with `id`, keeping its id, position and
    /// every other field. Absent ids are ignored.
    ///
    /// Returns whether an entry was changed.
    pub fn update_size(&mut self, id: &WishlistEntryId, new_size: &str) -> bool {
        let updated = self.set_size(id, new_size);
        self.commit();
        updated
    }

    /// Like [`update_size`](Self::update_size), but a failed storage write is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list could not be written.
    pub fn try_update_size(
        &mut self,
        id: &WishlistEntryId,
        new_size: &str,
    ) -> Result<bool, WishlistError> {
        let updated = self.set_size(id, new_size);
        self.persist()?;
        Ok(updated)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.commit();
    }

    /// Like [`clear`](Self::clear), but a failed storage write is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the empty list could not be written.
    pub fn try_clear(&mut self) -> Result<(), WishlistError> {
        self.entries.clear();
        self.persist()
    }

    fn insert(
        &mut self,
        product: &Product,
        color_index: usize,
        size: Option<&str>,
        today: NaiveDate,
    ) -> Result<AddOutcome, WishlistError> {
        let size = size
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(WishlistError::MissingSize)?;

        let id = WishlistEntryId::compose(&product.id, color_index, size);
        if self.get(&id).is_some() {
            debug!(id = %id, "Wishlist entry already present");
            return Ok(AddOutcome::AlreadyPresent(id));
        }

        self.entries
            .push(WishlistEntry::from_product(product, color_index, size, today));
        Ok(AddOutcome::Added(id))
    }

    fn remove_entry(&mut self, id: &WishlistEntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.id != id);
        self.entries.len() != before
    }

    fn set_size(&mut self, id: &WishlistEntryId, new_size: &str) -> bool {
        self.entries
            .iter_mut()
            .find(|entry| &entry.id == id)
            .map(|entry| entry.size = new_size.to_owned())
            .is_some()
    }

    /// Persist after a mutation. Write failures are logged; the in-memory
    /// list stays authoritative.
    fn commit(&self) {
        if let Err(e) = self.persist() {
            error!(key = %self.key, error = %e, "Failed to persist wishlist");
        }
    }
}

fn read_snapshot(storage: &dyn KeyValueStorage, key: &str) -> Vec<WishlistEntry> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "Wishlist storage read failed, starting empty");
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(key, error = %e, "Wishlist snapshot is malformed, starting empty");
        Vec::new()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use wishlist_core::{Price, ProductColor, ProductId, ProductPrice, ProductVariation};

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            header: format!("Product {id}"),
            sub_header: "Sub".to_string(),
            colors: vec![ProductColor {
                name: "Black".to_string(),
            }],
            variations: vec![ProductVariation {
                preview: format!("{id}.jpg"),
                images: Vec::new(),
                product_price: Some(ProductPrice {
                    price: Price::from_cents(2500),
                }),
            }],
            product_measurements: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    /// Storage whose writes always fail. Reads serve a fixed snapshot.
    struct FailingStorage {
        snapshot: Option<String>,
    }

    impl KeyValueStorage for FailingStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.snapshot.clone())
        }

        fn set_item(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    fn failing_store(entries: &[WishlistEntry]) -> WishlistStore {
        let storage = FailingStorage {
            snapshot: Some(serde_json::to_string(entries).unwrap()),
        };
        WishlistStore::load(Arc::new(storage), DEFAULT_STORAGE_KEY)
    }

    fn store_with(storage: &MemoryStorage) -> WishlistStore {
        WishlistStore::load(Arc::new(storage.clone()), DEFAULT_STORAGE_KEY)
    }

    fn snapshot(storage: &MemoryStorage) -> Vec<WishlistEntry> {
        let raw = storage.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_add_without_size_is_rejected() {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);

        for size in [None, Some(""), Some("   ")] {
            let result = store.add(&product("P1"), 0, size, today());
            assert!(matches!(result, Err(WishlistError::MissingSize)));
        }
        assert!(store.is_empty());
        assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_add_same_combination_twice() {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);

        let first = store.add(&product("P1"), 0, Some("M"), today()).unwrap();
        let second = store.add(&product("P1"), 0, Some("M"), today()).unwrap();

        assert_eq!(first, AddOutcome::Added(WishlistEntryId::new("P1-0-M")));
        assert_eq!(
            second,
            AddOutcome::AlreadyPresent(WishlistEntryId::new("P1-0-M"))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);
        store.add(&product("B"), 0, Some("S"), today()).unwrap();
        store.add(&product("A"), 0, Some("S"), today()).unwrap();
        store.add(&product("B"), 0, Some("L"), today()).unwrap();

        let ids: Vec<&str> = store.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["B-0-S", "A-0-S", "B-0-L"]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);
        store.add(&product("P1"), 0, Some("M"), today()).unwrap();
        let before = store.entries().to_vec();

        assert!(!store.remove(&WishlistEntryId::new("nope")));
        assert_eq!(store.entries(), before.as_slice());
    }

    #[test]
    fn test_update_size_keeps_id_position_and_fields() {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);
        store.add(&product("P0"), 0, Some("S"), today()).unwrap();
        store.add(&product("P1"), 0, Some("M"), today()).unwrap();
        store.add(&product("P2"), 0, Some("S"), today()).unwrap();
        let original = store.entries()[1].clone();

        assert!(store.update_size(&WishlistEntryId::new("P1-0-M"), "L"));

        let updated = &store.entries()[1];
        assert_eq!(updated.size, "L");
        assert_eq!(updated.id.as_str(), "P1-0-M");
        assert_eq!(
            WishlistEntry {
                size: original.size.clone(),
                ..updated.clone()
            },
            original
        );
        assert!(!store.update_size(&WishlistEntryId::new("missing"), "XL"));
    }

    #[test]
    fn test_every_mutation_round_trips_through_storage() {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);

        store.add(&product("P1"), 0, Some("M"), today()).unwrap();
        assert_eq!(snapshot(&storage), store.entries());

        store.add(&product("P2"), 0, Some("S"), today()).unwrap();
        store.update_size(&WishlistEntryId::new("P2-0-S"), "XS");
        assert_eq!(snapshot(&storage), store.entries());

        store.remove(&WishlistEntryId::new("P1-0-M"));
        assert_eq!(snapshot(&storage), store.entries());

        let reloaded = store_with(&storage);
        assert_eq!(reloaded.entries(), store.entries());

        store.clear();
        assert!(snapshot(&storage).is_empty());
    }

    #[test]
    fn test_load_malformed_snapshot_starts_empty() {
        let storage = MemoryStorage::with_item(DEFAULT_STORAGE_KEY, "{not json");
        let store = store_with(&storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_starts_empty() {
        let storage = MemoryStorage::with_item(DEFAULT_STORAGE_KEY, r#"{"id":"x"}"#);
        assert!(store_with(&storage).is_empty());
    }

    #[test]
    fn test_scenario_add_duplicate_remove() {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);
        let p1 = product("P1");

        store.add(&p1, 0, Some("M"), today()).unwrap();
        let entry = store.get(&WishlistEntryId::new("P1-0-M")).unwrap();
        assert_eq!(entry.price, Price::from_cents(2500));
        assert_eq!(entry.preview, "P1.jpg");

        store.add(&p1, 0, Some("M"), today()).unwrap();
        assert_eq!(store.len(), 1);

        store.remove(&WishlistEntryId::new("P1-0-M"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_result() {
        let saved = vec![WishlistEntry::from_product(&product("P1"), 0, "S", today())];
        let mut store = failing_store(&saved);
        assert_eq!(store.len(), 1);

        let outcome = store.add(&product("P2"), 0, Some("M"), today()).unwrap();
        assert_eq!(outcome, AddOutcome::Added(WishlistEntryId::new("P2-0-M")));
        assert_eq!(store.len(), 2);

        assert!(store.update_size(&WishlistEntryId::new("P1-0-S"), "L"));
        assert_eq!(store.entries()[0].size, "L");

        assert!(store.remove(&WishlistEntryId::new("P2-0-M")));
        assert_eq!(store.len(), 1);

        assert!(matches!(store.persist(), Err(WishlistError::Storage(_))));
    }

    #[test]
    fn test_try_variants_report_write_failure() {
        let saved = vec![WishlistEntry::from_product(&product("P1"), 0, "S", today())];
        let mut store = failing_store(&saved);
        let p1_s = WishlistEntryId::new("P1-0-S");

        let err = store.try_add(&product("P2"), 0, Some("M"), today()).unwrap_err();
        assert!(matches!(err, WishlistError::Storage(StorageError::Io { .. })));
        assert!(store.get(&WishlistEntryId::new("P2-0-M")).is_some());

        // Duplicates write nothing, so nothing can fail
        let outcome = store.try_add(&product("P1"), 0, Some("S"), today()).unwrap();
        assert_eq!(outcome, AddOutcome::AlreadyPresent(p1_s.clone()));

        assert!(matches!(
            store.try_update_size(&p1_s, "L"),
            Err(WishlistError::Storage(_))
        ));
        assert_eq!(store.get(&p1_s).unwrap().size, "L");

        assert!(matches!(store.try_remove(&p1_s), Err(WishlistError::Storage(_))));
        assert!(store.get(&p1_s).is_none());

        assert!(matches!(store.try_clear(), Err(WishlistError::Storage(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_try_variants_write_once() {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);
        let id = WishlistEntryId::new("P1-0-M");

        store.try_add(&product("P1"), 0, Some("M"), today()).unwrap();
        assert_eq!(snapshot(&storage).len(), 1);

        assert!(store.try_update_size(&id, "L").unwrap());
        assert_eq!(snapshot(&storage)[0].size, "L");

        assert!(!store.try_remove(&WishlistEntryId::new("P9-0-M")).unwrap());
        assert!(store.try_remove(&id).unwrap());
        assert!(snapshot(&storage).is_empty());
    }
}
