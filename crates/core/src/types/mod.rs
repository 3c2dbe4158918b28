//! Core types for the wishlist.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod wishlist;

pub use id::*;
pub use price::Price;
pub use product::{
    Product, ProductColor, ProductImage, ProductMeasurements, ProductPrice, ProductVariation,
};
pub use wishlist::{BasketColor, BasketProduct, BasketVariation, WishlistEntry};
