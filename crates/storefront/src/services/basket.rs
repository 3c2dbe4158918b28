//! Basket collaborator.
//!
//! The wishlist hands saved items to the basket as a [`BasketProduct`] plus a
//! color index and size. [`MemoryBasket`] is a process-local basket that
//! records those lines so the basket page can show them.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use wishlist_core::{BasketProduct, Price, ProductId};

/// Errors raised by a basket.
#[derive(Debug, Error)]
pub enum BasketError {
    /// The product has no color or variation at the requested index.
    #[error("product {product} has no variation at index {index}")]
    MissingVariation { product: ProductId, index: usize },
}

/// A line in the basket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketLine {
    pub product_id: ProductId,
    pub name: String,
    pub color: String,
    pub size: String,
    pub preview: String,
    pub price: Price,
    pub quantity: u32,
}

/// Accepts products handed over from the wishlist.
#[async_trait]
pub trait Basket: Send + Sync {
    /// Add one unit of `product` in the color at `color_index` and `size`.
    ///
    /// # Errors
    ///
    /// Returns an error if the product has no variation at `color_index`.
    async fn add_to_basket(
        &self,
        product: BasketProduct,
        color_index: usize,
        size: &str,
    ) -> Result<(), BasketError>;

    /// Current basket lines.
    async fn lines(&self) -> Vec<BasketLine>;
}

/// In-memory basket. Clones share the same lines.
#[derive(Debug, Clone, Default)]
pub struct MemoryBasket {
    lines: Arc<RwLock<Vec<BasketLine>>>,
}

impl MemoryBasket {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Basket for MemoryBasket {
    async fn add_to_basket(
        &self,
        product: BasketProduct,
        color_index: usize,
        size: &str,
    ) -> Result<(), BasketError> {
        let variation = product
            .variation(color_index)
            .ok_or_else(|| BasketError::MissingVariation {
                product: product.id.clone(),
                index: color_index,
            })?;
        let color = product.color_name(color_index).unwrap_or_default();

        let mut lines = self.lines.write().await;
        let existing = lines
            .iter_mut()
            .find(|line| line.product_id == product.id && line.color == color && line.size == size);

        if let Some(line) = existing {
            line.quantity += 1;
        } else {
            lines.push(BasketLine {
                product_id: product.id.clone(),
                name: product.header.clone(),
                color: color.to_string(),
                size: size.to_string(),
                preview: variation.preview.clone(),
                price: variation.price,
                quantity: 1,
            });
        }

        tracing::info!(product_id = %product.id, size, "Added to basket");
        Ok(())
    }

    async fn lines(&self) -> Vec<BasketLine> {
        self.lines.read().await.clone()
    }
}
