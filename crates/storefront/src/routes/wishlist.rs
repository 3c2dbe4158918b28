//! Wishlist route handlers.
//!
//! Every mutation answers with a `303 See Other` so a page reload never
//! replays a form post. Notices raised by an action are shown on the next
//! render of the wishlist page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;
use wishlist_core::{ProductId, WishlistEntryId};

use crate::error::Result;
use crate::filters;
use crate::state::AppState;
use crate::wishlist::{Navigation, WishlistPage};

/// Save-to-wishlist form data (posted from product pages).
#[derive(Debug, Deserialize)]
pub struct AddToWishlistForm {
    pub product_id: String,
    #[serde(default)]
    pub color_index: usize,
    pub size: Option<String>,
}

/// Size dialog form data.
#[derive(Debug, Deserialize)]
pub struct UpdateSizeForm {
    #[serde(default)]
    pub size: String,
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistShowTemplate {
    pub page: WishlistPage,
}

/// Display the wishlist page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    WishlistShowTemplate {
        page: state.wishlist().page().await,
    }
}

/// Save a product to the wishlist.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToWishlistForm>,
) -> Result<Redirect> {
    let product_id = ProductId::parse(&form.product_id)?;
    state
        .wishlist()
        .add(&product_id, form.color_index, form.size.as_deref())
        .await?;
    Ok(Redirect::to(Navigation::Wishlist.path()))
}

/// Remove an entry.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect> {
    let id = WishlistEntryId::parse(&id)?;
    state.wishlist().remove(&id).await;
    Ok(Redirect::to(Navigation::Wishlist.path()))
}

/// Open the size dialog for an entry.
#[instrument(skip(state))]
pub async fn edit(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect> {
    let id = WishlistEntryId::parse(&id)?;
    state.wishlist().request_edit(&id).await;
    Ok(Redirect::to(Navigation::Wishlist.path()))
}

/// Dismiss the size dialog.
#[instrument(skip(state))]
pub async fn cancel_edit(State(state): State<AppState>) -> Redirect {
    state.wishlist().cancel_edit().await;
    Redirect::to(Navigation::Wishlist.path())
}

/// Apply the size chosen in the dialog.
#[instrument(skip(state))]
pub async fn update_size(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UpdateSizeForm>,
) -> Result<Redirect> {
    let id = WishlistEntryId::parse(&id)?;
    state.wishlist().confirm_size(&id, &form.size).await;
    Ok(Redirect::to(Navigation::Wishlist.path()))
}

/// Move an entry into the basket.
#[instrument(skip(state))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = WishlistEntryId::parse(&id)?;
    let next = state.wishlist().add_to_cart(&id).await?;
    Ok(Redirect::to(next.path()))
}
