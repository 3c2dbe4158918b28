//! Wishlist Core - Shared types library.
//!
//! This crate provides the types shared by the wishlist components:
//! - `storefront` - Wishlist store, page controller and HTTP routes
//! - `cli` - Command-line access to the same durable storage
//!
//! # Architecture
//!
//! The core crate contains only types and pure conversions - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, catalog products and wishlist entries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
