//! Collaborators the wishlist consumes.
//!
//! # Services
//!
//! - `catalog` - Product lookup over HTTP (cached)
//! - `basket` - Destination of the "add to cart" handoff
//! - `notifications` - Fire-and-forget toasts shown on the next render

pub mod basket;
pub mod catalog;
pub mod notifications;

pub use basket::{Basket, BasketError, BasketLine, MemoryBasket};
pub use catalog::{CatalogClient, CatalogError, ProductLookup};
pub use notifications::{Notice, NoticeLevel, Notifications};
