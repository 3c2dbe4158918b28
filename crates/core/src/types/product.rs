//! Catalog product record as returned by the product-lookup service.
//!
//! Only the fields the wishlist reads are modelled. Everything except the id
//! is optional on the wire, so sparse records still deserialize.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as published by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub sub_header: String,
    /// Color options, indexed in parallel with `variations`.
    #[serde(default)]
    pub colors: Vec<ProductColor>,
    #[serde(default)]
    pub variations: Vec<ProductVariation>,
    #[serde(default)]
    pub product_measurements: Option<ProductMeasurements>,
}

/// A named color option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductColor {
    #[serde(default)]
    pub name: String,
}

/// Per-color variation: imagery and price.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariation {
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub product_price: Option<ProductPrice>,
}

/// An image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub href: String,
}

/// Price attached to a variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPrice {
    #[serde(default)]
    pub price: Price,
}

/// Size chart tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductMeasurements {
    /// Rows of the metric chart. Row 0 is the header; column 0 of every
    /// other row is the size label.
    #[serde(default)]
    pub metric: Vec<Vec<String>>,
}

impl Product {
    /// Color name at `index`, or an empty string when out of range.
    #[must_use]
    pub fn color_name(&self, index: usize) -> &str {
        self.colors.get(index).map_or("", |color| color.name.as_str())
    }

    /// Variation at `index`, if the catalog published one.
    #[must_use]
    pub fn variation(&self, index: usize) -> Option<&ProductVariation> {
        self.variations.get(index)
    }

    /// Size labels offered for this product.
    ///
    /// Taken from the metric size chart: the header row is skipped and the
    /// first cell of each remaining row is the label. Rows with no cells are
    /// ignored. Products without a chart offer no sizes.
    #[must_use]
    pub fn size_options(&self) -> Vec<String> {
        self.product_measurements
            .as_ref()
            .map(|measurements| {
                measurements
                    .metric
                    .iter()
                    .skip(1)
                    .filter_map(|row| row.first().cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl ProductVariation {
    /// The variation price, zero when absent.
    #[must_use]
    pub fn price(&self) -> Price {
        self.product_price.map_or(Price::ZERO, |p| p.price)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "P1",
            "header": "Linen Shirt",
            "subHeader": "Relaxed fit",
            "colors": [{"name": "Sand"}, {"name": "Navy"}],
            "variations": [
                {
                    "preview": "https://cdn.example/p1-sand.jpg",
                    "images": [{"href": "https://cdn.example/p1-sand-1.jpg"}],
                    "productPrice": {"price": 59.5}
                }
            ],
            "productMeasurements": {
                "metric": [["Size", "Chest"], ["S", "96"], ["M", "102"], [], ["L", "108"]]
            }
        }"#
    }

    #[test]
    fn test_deserialize_catalog_record() {
        let product: Product = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(product.id.as_str(), "P1");
        assert_eq!(product.sub_header, "Relaxed fit");
        assert_eq!(product.color_name(1), "Navy");
        assert_eq!(product.variation(0).unwrap().price().display(), "$59.50");
    }

    #[test]
    fn test_size_options_skip_header_and_empty_rows() {
        let product: Product = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(product.size_options(), vec!["S", "M", "L"]);
    }

    #[test]
    fn test_sparse_record() {
        let product: Product = serde_json::from_str(r#"{"id": "P2"}"#).unwrap();
        assert!(product.size_options().is_empty());
        assert_eq!(product.color_name(0), "");
        assert!(product.variation(0).is_none());
    }
}
