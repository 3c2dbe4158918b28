//! Wishlist storefront library.
//!
//! Holds the wishlist store and page controller, the collaborators they talk
//! to (catalog, basket, notifications) and the HTTP surface that renders
//! them. The `wishlist-storefront` binary and the CLI are thin shells over
//! this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod wishlist;
