//! Integration tests for the wishlist storefront.
//!
//! Tests drive the real router in-process with `tower::ServiceExt::oneshot`;
//! no server or network is needed. The catalog is replaced by a fixed set of
//! products and storage lives in memory, so every test starts clean.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wishlist-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use chrono::NaiveDate;
use tower::ServiceExt;
use wishlist_core::{
    Price, Product, ProductColor, ProductId, ProductImage, ProductMeasurements, ProductPrice,
    ProductVariation, WishlistEntry,
};
use wishlist_storefront::routes;
use wishlist_storefront::services::{
    Basket, BasketLine, CatalogError, MemoryBasket, Notifications, ProductLookup,
};
use wishlist_storefront::state::AppState;
use wishlist_storefront::storage::{KeyValueStorage, MemoryStorage};
use wishlist_storefront::wishlist::{DEFAULT_STORAGE_KEY, WishlistStore, WishlistView};

/// Date every test treats as "today".
pub const TODAY: (i32, u32, u32) = (2026, 3, 14);

fn today() -> NaiveDate {
    let (y, m, d) = TODAY;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Catalog serving a fixed set of products.
#[derive(Default)]
pub struct StaticCatalog {
    products: HashMap<ProductId, Product>,
    failing: bool,
}

impl StaticCatalog {
    /// Catalog holding `products`.
    #[must_use]
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
            failing: false,
        }
    }

    /// Catalog whose every lookup fails with an upstream error.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            products: HashMap::new(),
            failing: true,
        }
    }
}

#[async_trait]
impl ProductLookup for StaticCatalog {
    async fn product_by_id(&self, id: &ProductId) -> Result<Product, CatalogError> {
        if self.failing {
            return Err(CatalogError::Status {
                status: 502,
                body: "upstream down".to_string(),
            });
        }
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }
}

/// A linen shirt in two colors with sizes S, M and L.
#[must_use]
pub fn linen_shirt() -> Product {
    Product {
        id: ProductId::new("P1"),
        header: "Linen Shirt".to_string(),
        sub_header: "Relaxed fit".to_string(),
        colors: vec![
            ProductColor {
                name: "Sand".to_string(),
            },
            ProductColor {
                name: "Navy".to_string(),
            },
        ],
        variations: vec![
            ProductVariation {
                preview: "https://cdn.example.test/sand.jpg".to_string(),
                images: vec![ProductImage {
                    href: "https://cdn.example.test/sand-1.jpg".to_string(),
                }],
                product_price: Some(ProductPrice {
                    price: Price::from_cents(5950),
                }),
            },
            ProductVariation {
                preview: String::new(),
                images: Vec::new(),
                product_price: None,
            },
        ],
        product_measurements: Some(ProductMeasurements {
            metric: vec![
                vec!["Size".to_string(), "Chest".to_string()],
                vec!["S".to_string(), "96".to_string()],
                vec!["M".to_string(), "100".to_string()],
                vec!["L".to_string(), "104".to_string()],
            ],
        }),
    }
}

/// In-process storefront with inspectable storage and basket.
pub struct TestContext {
    pub app: Router,
    pub storage: MemoryStorage,
    pub basket: MemoryBasket,
}

impl TestContext {
    /// Storefront with an empty wishlist and the default catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with(MemoryStorage::new(), StaticCatalog::new([linen_shirt()]))
    }

    /// Storefront over the given storage and catalog.
    #[must_use]
    pub fn with(storage: MemoryStorage, catalog: StaticCatalog) -> Self {
        let basket = MemoryBasket::new();
        let store = WishlistStore::load(Arc::new(storage.clone()), DEFAULT_STORAGE_KEY);
        let view = WishlistView::with_clock(
            store,
            Arc::new(catalog),
            Arc::new(basket.clone()),
            Notifications::new(),
            today,
        );
        let state = AppState::new(view, Arc::new(basket.clone()));

        Self {
            app: routes::app(state),
            storage,
            basket,
        }
    }

    /// Issue a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Issue a form POST request.
    pub async fn post_form(&self, path: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Save the default shirt in color `color` and `size`.
    pub async fn save(&self, color: usize, size: &str) -> TestResponse {
        self.post_form(
            "/wishlist/add",
            &format!("product_id=P1&color_index={color}&size={size}"),
        )
        .await
    }

    /// Entries currently written to storage.
    #[must_use]
    pub fn stored_entries(&self) -> Vec<WishlistEntry> {
        self.storage
            .get_item(DEFAULT_STORAGE_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
            .unwrap_or_default()
    }

    /// Current basket lines.
    pub async fn basket_lines(&self) -> Vec<BasketLine> {
        self.basket.lines().await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Redirect target, if the response is a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Assert a `303 See Other` redirect to `path`.
    pub fn assert_redirect(&self, path: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location(), Some(path));
    }
}
