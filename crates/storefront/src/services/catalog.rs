//! Product catalog client.
//!
//! Fetches product records from the catalog service with `reqwest` and
//! caches them with `moka`. The wishlist only needs lookups by id, used to
//! offer size options when an entry is edited and to save new entries.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;
use wishlist_core::{Product, ProductId};

use crate::config::CatalogConfig;

/// Errors that can occur when looking up products.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an unexpected status.
    #[error("catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not a product record.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No product with this id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Rate limited by the catalog.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The product id could not be placed in a URL.
    #[error("invalid product URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Looks up full product records by id.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Fetch the product with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the lookup fails.
    async fn product_by_id(&self, id: &ProductId) -> Result<Product, CatalogError>;
}

/// HTTP client for the catalog service.
///
/// Products are cached for the configured TTL (5 minutes by default).
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<String>,
    cache: Cache<ProductId, Product>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_token: config
                    .api_token
                    .as_ref()
                    .map(|token| token.expose_secret().to_string()),
                cache,
            }),
        }
    }

    fn product_url(&self, id: &ProductId) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["products", id.as_str()]);
        Ok(url)
    }

    async fn fetch(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let url = self.product_url(id)?;
        let mut request = self.inner.client.get(url).header("Accept", "application/json");
        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id.clone()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog product"
            );
            CatalogError::Parse(e)
        })
    }
}

#[async_trait]
impl ProductLookup for CatalogClient {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn product_by_id(&self, id: &ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.inner.cache.get(id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product = self.fetch(id).await?;

        self.inner.cache.insert(id.clone(), product.clone()).await;

        Ok(product)
    }
}
