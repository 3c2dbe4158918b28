//! HTTP route handlers for the wishlist storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Wishlist
//! GET  /wishlist               - Wishlist page (toasts + size dialog)
//! POST /wishlist/add           - Save a product (product_id, color_index, size)
//! POST /wishlist/edit/cancel   - Close the size dialog
//! POST /wishlist/{id}/remove   - Remove an entry
//! POST /wishlist/{id}/edit     - Load sizes and open the size dialog
//! POST /wishlist/{id}/size     - Apply a new size
//! POST /wishlist/{id}/cart     - Move an entry to the basket
//!
//! # Basket
//! GET  /basket                 - Basket lines
//! ```

pub mod basket;
pub mod wishlist;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::error::AppError;
use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Directory static assets are served from, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/edit/cancel", post(wishlist::cancel_edit))
        .route("/{id}/remove", post(wishlist::remove))
        .route("/{id}/edit", post(wishlist::edit))
        .route("/{id}/size", post(wishlist::update_size))
        .route("/{id}/cart", post(wishlist::add_to_cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/wishlist", wishlist_routes())
        .route("/basket", get(basket::show))
        .fallback(not_found)
}

/// Build the full application: routes, static assets and per-request
/// middleware, bound to `state`.
///
/// Sentry and tracing layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    routes()
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> AppError {
    AppError::NotFound("page".to_string())
}
