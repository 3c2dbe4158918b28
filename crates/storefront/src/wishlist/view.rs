//! Wishlist page controller.
//!
//! Translates user gestures into store mutations, notices and navigation,
//! and builds the view model the page template renders.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use wishlist_core::{ProductId, WishlistEntry, WishlistEntryId};

use super::{AddOutcome, EditSession, EditState, WishlistError, WishlistStore};
use crate::error::add_breadcrumb;
use crate::services::{
    Basket, BasketError, CatalogError, Notice, Notifications, ProductLookup,
};

/// Thumbnail used when an entry has no imagery.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300";

const MSG_SELECT_SIZE: &str = "Please select a size";
const MSG_ADDED: &str = "Added to your wishlist!";
const MSG_ALREADY_PRESENT: &str = "This item is already in your wishlist";
const MSG_SIZE_UPDATED: &str = "Size updated!";
const MSG_ENTRY_GONE: &str = "That item is no longer in your wishlist";
const MSG_PRODUCT_NOT_FOUND: &str = "That product is no longer available";
const MSG_SIZES_UNAVAILABLE: &str = "Could not load sizes, please try again";

/// Where the browser should go after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Wishlist,
    Basket,
}

impl Navigation {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Wishlist => "/wishlist",
            Self::Basket => "/basket",
        }
    }
}

/// One rendered wishlist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub id: String,
    /// `id` percent-encoded for use as a path segment.
    pub id_path: String,
    pub product_id: String,
    /// `product_id` percent-encoded for use as a path segment.
    pub product_path: String,
    pub name: String,
    pub sub_header: String,
    pub color: String,
    pub size: String,
    pub price: String,
    pub image_url: String,
    pub added_label: String,
}

impl EntryView {
    fn new(entry: &WishlistEntry, today: NaiveDate) -> Self {
        Self {
            id: entry.id.to_string(),
            id_path: path_segment(entry.id.as_str()),
            product_id: entry.product_id.to_string(),
            product_path: path_segment(entry.product_id.as_str()),
            name: entry.name.clone(),
            sub_header: entry.sub_header.clone(),
            color: entry.color.clone(),
            size: entry.size.clone(),
            price: entry.price.display(),
            image_url: entry.thumbnail().unwrap_or(PLACEHOLDER_IMAGE).to_string(),
            added_label: format_date(entry.added_on.unwrap_or(today)),
        }
    }
}

/// The open size-edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDialogView {
    pub entry_id: String,
    /// `entry_id` percent-encoded for use as a path segment.
    pub entry_path: String,
    pub name: String,
    pub current_size: String,
    pub sizes: Vec<String>,
}

/// Everything the wishlist page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistPage {
    pub count: usize,
    pub entries: Vec<EntryView>,
    pub notices: Vec<Notice>,
    pub edit: Option<EditDialogView>,
    pub loading_sizes: bool,
}

impl WishlistPage {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Controller for the wishlist page.
///
/// Owns the [`WishlistStore`]; every mutation goes through here. Cheap to
/// clone.
#[derive(Clone)]
pub struct WishlistView {
    inner: Arc<WishlistViewInner>,
}

struct WishlistViewInner {
    store: Mutex<WishlistStore>,
    edit: Mutex<EditSession>,
    catalog: Arc<dyn ProductLookup>,
    basket: Arc<dyn Basket>,
    notifications: Notifications,
    today: fn() -> NaiveDate,
}

impl WishlistView {
    /// Create a controller over `store`.
    #[must_use]
    pub fn new(
        store: WishlistStore,
        catalog: Arc<dyn ProductLookup>,
        basket: Arc<dyn Basket>,
        notifications: Notifications,
    ) -> Self {
        Self::with_clock(store, catalog, basket, notifications, local_today)
    }

    /// Create a controller with a fixed source for "today".
    #[must_use]
    pub fn with_clock(
        store: WishlistStore,
        catalog: Arc<dyn ProductLookup>,
        basket: Arc<dyn Basket>,
        notifications: Notifications,
        today: fn() -> NaiveDate,
    ) -> Self {
        Self {
            inner: Arc::new(WishlistViewInner {
                store: Mutex::new(store),
                edit: Mutex::new(EditSession::new()),
                catalog,
                basket,
                notifications,
                today,
            }),
        }
    }

    /// Notice queue shared with the rest of the app.
    #[must_use]
    pub fn notifications(&self) -> &Notifications {
        &self.inner.notifications
    }

    /// Build the page model, draining pending notices.
    pub async fn page(&self) -> WishlistPage {
        let store = self.inner.store.lock().await;
        let edit = self.inner.edit.lock().await;
        let today = (self.inner.today)();

        let entries: Vec<EntryView> = store
            .entries()
            .iter()
            .map(|entry| EntryView::new(entry, today))
            .collect();

        let dialog = match edit.state() {
            EditState::Editing { entry, sizes } => store.get(entry).map(|e| EditDialogView {
                entry_id: e.id.to_string(),
                entry_path: path_segment(e.id.as_str()),
                name: e.name.clone(),
                current_size: e.size.clone(),
                sizes: sizes.clone(),
            }),
            EditState::Idle | EditState::LoadingSizes { .. } => None,
        };

        WishlistPage {
            count: entries.len(),
            entries,
            notices: self.inner.notifications.drain(),
            edit: dialog,
            loading_sizes: matches!(edit.state(), EditState::LoadingSizes { .. }),
        }
    }

    /// Current edit dialog state.
    pub async fn edit_state(&self) -> EditState {
        self.inner.edit.lock().await.state().clone()
    }

    /// Snapshot of the stored entries.
    pub async fn entries(&self) -> Vec<WishlistEntry> {
        self.inner.store.lock().await.entries().to_vec()
    }

    /// Save a product from the catalog.
    ///
    /// Returns `None` when nothing was saved because no size was chosen or
    /// the product is unknown; a notice explains why.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog lookup fails for any other reason.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add(
        &self,
        product_id: &ProductId,
        color_index: usize,
        size: Option<&str>,
    ) -> Result<Option<AddOutcome>, CatalogError> {
        if size.is_none_or(|s| s.trim().is_empty()) {
            self.notify(Notice::error(MSG_SELECT_SIZE));
            return Ok(None);
        }

        let product = match self.inner.catalog.product_by_id(product_id).await {
            Ok(product) => product,
            Err(CatalogError::NotFound(_)) => {
                self.notify(Notice::error(MSG_PRODUCT_NOT_FOUND));
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let today = (self.inner.today)();
        let result = self
            .inner
            .store
            .lock()
            .await
            .add(&product, color_index, size, today);

        match result {
            Ok(AddOutcome::Added(id)) => {
                info!(entry_id = %id, "Saved to wishlist");
                add_breadcrumb("wishlist", "Saved item", Some(&[("entry_id", id.as_str())]));
                self.notify(Notice::success(MSG_ADDED));
                Ok(Some(AddOutcome::Added(id)))
            }
            Ok(AddOutcome::AlreadyPresent(id)) => {
                self.notify(Notice::info(MSG_ALREADY_PRESENT));
                Ok(Some(AddOutcome::AlreadyPresent(id)))
            }
            Err(WishlistError::MissingSize) => {
                self.notify(Notice::error(MSG_SELECT_SIZE));
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Unexpected wishlist add failure");
                Ok(None)
            }
        }
    }

    /// Remove an entry. Absent ids are ignored.
    #[instrument(skip(self), fields(entry_id = %id))]
    pub async fn remove(&self, id: &WishlistEntryId) -> bool {
        let mut store = self.inner.store.lock().await;
        let removed = store.remove(id);
        self.inner.edit.lock().await.forget(id);
        drop(store);

        if removed {
            add_breadcrumb("wishlist", "Removed item", Some(&[("entry_id", id.as_str())]));
        }
        removed
    }

    /// Open the size dialog for an entry.
    ///
    /// Sizes are fetched from the catalog without holding the store. If the
    /// dialog was cancelled, another edit started, or the entry was removed
    /// while the lookup ran, the result is discarded. Returns whether the
    /// dialog opened.
    #[instrument(skip(self), fields(entry_id = %id))]
    pub async fn request_edit(&self, id: &WishlistEntryId) -> bool {
        // The ticket is issued under the store lock so a concurrent remove
        // either happens first or sees the pending request and forgets it.
        let store = self.inner.store.lock().await;
        let Some(product_id) = store.get(id).map(|entry| entry.product_id.clone()) else {
            drop(store);
            self.notify(Notice::error(MSG_ENTRY_GONE));
            return false;
        };
        let ticket = self.inner.edit.lock().await.begin(id.clone());
        drop(store);

        let lookup = self.inner.catalog.product_by_id(&product_id).await;

        let mut edit = self.inner.edit.lock().await;
        match lookup {
            Ok(product) => {
                let applied = edit.resolve(ticket, product.size_options());
                if !applied {
                    info!("Discarded stale size lookup");
                }
                applied
            }
            Err(e) => {
                if edit.fail(ticket) {
                    warn!(error = %e, "Size lookup failed");
                    self.notify(Notice::error(MSG_SIZES_UNAVAILABLE));
                }
                false
            }
        }
    }

    /// Close the size dialog, cancelling any pending lookup.
    pub async fn cancel_edit(&self) {
        self.inner.edit.lock().await.close();
    }

    /// Apply the size chosen in the dialog and close it.
    #[instrument(skip(self), fields(entry_id = %id))]
    pub async fn confirm_size(&self, id: &WishlistEntryId, size: &str) -> bool {
        let size = size.trim();
        if size.is_empty() {
            self.notify(Notice::error(MSG_SELECT_SIZE));
            return false;
        }

        let updated = self.inner.store.lock().await.update_size(id, size);
        self.inner.edit.lock().await.close();

        if updated {
            self.notify(Notice::success(MSG_SIZE_UPDATED));
        } else {
            self.notify(Notice::error(MSG_ENTRY_GONE));
        }
        updated
    }

    /// Move an entry into the basket.
    ///
    /// The entry is rebuilt into the basket's product shape, handed over
    /// with color index 0, then removed from the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the basket rejects the product; the entry is kept.
    #[instrument(skip(self), fields(entry_id = %id))]
    pub async fn add_to_cart(&self, id: &WishlistEntryId) -> Result<Navigation, BasketError> {
        let entry = self.inner.store.lock().await.get(id).cloned();

        let Some(entry) = entry else {
            self.notify(Notice::error(MSG_ENTRY_GONE));
            return Ok(Navigation::Wishlist);
        };

        if entry.size.trim().is_empty() {
            self.notify(Notice::error(MSG_SELECT_SIZE));
            return Ok(Navigation::Wishlist);
        }

        self.inner
            .basket
            .add_to_basket(entry.to_basket_product(), 0, &entry.size)
            .await?;

        self.remove(id).await;
        info!("Moved wishlist entry to basket");
        Ok(Navigation::Basket)
    }

    fn notify(&self, notice: Notice) {
        self.inner.notifications.push(notice);
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Sizes are free text (`S/M`, `36/38`), so ids must be encoded before they
/// go into a URL path.
fn path_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
