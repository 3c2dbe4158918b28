//! Wishlist entries and the basket handoff shape.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::{Price, Product, ProductId, WishlistEntryId};

/// One saved wishlist line.
///
/// Display fields are copied from the product when the entry is created and
/// are never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub id: WishlistEntryId,
    pub product_id: ProductId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sub_header: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub color: String,
    pub size: String,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Day the entry was saved. Older snapshots do not carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_on: Option<NaiveDate>,
}

impl WishlistEntry {
    /// Build an entry for `product` in the given color and size.
    ///
    /// Color, price and imagery come from the variation at `color_index`;
    /// anything missing falls back to empty values and a zero price.
    #[must_use]
    pub fn from_product(
        product: &Product,
        color_index: usize,
        size: &str,
        added_on: NaiveDate,
    ) -> Self {
        let variation = product.variation(color_index);

        Self {
            id: WishlistEntryId::compose(&product.id, color_index, size),
            product_id: product.id.clone(),
            name: product.header.clone(),
            sub_header: product.sub_header.clone(),
            price: variation.map_or(Price::ZERO, super::ProductVariation::price),
            color: product.color_name(color_index).to_owned(),
            size: size.to_owned(),
            preview: variation.map(|v| v.preview.clone()).unwrap_or_default(),
            images: variation
                .map(|v| v.images.iter().map(|img| img.href.clone()).collect())
                .unwrap_or_default(),
            added_on: Some(added_on),
        }
    }

    /// Primary thumbnail: the preview, else the first image.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        if self.preview.is_empty() {
            self.images.first().map(String::as_str)
        } else {
            Some(self.preview.as_str())
        }
    }

    /// Rebuild the product shape the basket expects from cached fields.
    ///
    /// The result carries exactly one color and one variation, so the basket
    /// must be called with color index 0.
    #[must_use]
    pub fn to_basket_product(&self) -> BasketProduct {
        BasketProduct {
            id: self.product_id.clone(),
            header: self.name.clone(),
            sub_header: self.sub_header.clone(),
            colors: vec![BasketColor {
                name: self.color.clone(),
            }],
            variations: vec![BasketVariation {
                preview: self.preview.clone(),
                price: self.price,
            }],
        }
    }
}

/// Display text copied from catalog records may be absent or `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Minimal product record accepted by the basket.
///
/// This is the whole contract between wishlist and basket: identity, display
/// text, and a single color/variation pair addressed as index 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketProduct {
    pub id: ProductId,
    pub header: String,
    pub sub_header: String,
    pub colors: Vec<BasketColor>,
    pub variations: Vec<BasketVariation>,
}

/// Color slot of a [`BasketProduct`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketColor {
    pub name: String,
}

/// Variation slot of a [`BasketProduct`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketVariation {
    pub preview: String,
    pub price: Price,
}

impl BasketProduct {
    /// Color name at `index`, if present.
    #[must_use]
    pub fn color_name(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(|c| c.name.as_str())
    }

    /// Variation at `index`, if present.
    #[must_use]
    pub fn variation(&self, index: usize) -> Option<&BasketVariation> {
        self.variations.get(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::{ProductColor, ProductImage, ProductPrice, ProductVariation};

    fn product() -> Product {
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
            variations: vec![ProductVariation {
                preview: "sand.jpg".to_string(),
                images: vec![
                    ProductImage {
                        href: "sand-1.jpg".to_string(),
                    },
                    ProductImage {
                        href: "sand-2.jpg".to_string(),
                    },
                ],
                product_price: Some(ProductPrice {
                    price: Price::from_cents(5950),
                }),
            }],
            product_measurements: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_from_product_copies_variation_fields() {
        let entry = WishlistEntry::from_product(&product(), 0, "M", today());
        assert_eq!(entry.id.as_str(), "P1-0-M");
        assert_eq!(entry.name, "Linen Shirt");
        assert_eq!(entry.color, "Sand");
        assert_eq!(entry.price, Price::from_cents(5950));
        assert_eq!(entry.preview, "sand.jpg");
        assert_eq!(entry.images, vec!["sand-1.jpg", "sand-2.jpg"]);
        assert_eq!(entry.added_on, Some(today()));
    }

    #[test]
    fn test_from_product_missing_variation_defaults() {
        let entry = WishlistEntry::from_product(&product(), 1, "L", today());
        assert_eq!(entry.color, "Navy");
        assert_eq!(entry.price, Price::ZERO);
        assert!(entry.preview.is_empty());
        assert!(entry.images.is_empty());
        assert_eq!(entry.thumbnail(), None);
    }

    #[test]
    fn test_thumbnail_falls_back_to_first_image() {
        let mut entry = WishlistEntry::from_product(&product(), 0, "M", today());
        entry.preview.clear();
        assert_eq!(entry.thumbnail(), Some("sand-1.jpg"));
    }

    #[test]
    fn test_basket_product_shape() {
        let entry = WishlistEntry::from_product(&product(), 0, "M", today());
        let basket = entry.to_basket_product();
        assert_eq!(basket.id.as_str(), "P1");
        assert_eq!(basket.color_name(0), Some("Sand"));
        assert_eq!(basket.variation(0).unwrap().price, Price::from_cents(5950));
        assert_eq!(basket.variation(0).unwrap().preview, "sand.jpg");
        assert!(basket.variation(1).is_none());
    }

    #[test]
    fn test_entry_json_is_camel_case() {
        let entry = WishlistEntry::from_product(&product(), 0, "M", today());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["productId"], "P1");
        assert_eq!(json["subHeader"], "Relaxed fit");
        assert_eq!(json["addedOn"], "2024-05-01");
    }

    #[test]
    fn test_entry_without_added_on_loads() {
        let json = r#"{"id":"P1-0-M","productId":"P1","name":"Shirt","price":12,"size":"M"}"#;
        let entry: WishlistEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.added_on, None);
        assert_eq!(entry.price.display(), "$12.00");
    }

    #[test]
    fn test_entry_with_missing_or_null_text_loads() {
        let json = r#"[
            {"id":"P1-0-M","productId":"P1","subHeader":null,"size":"M"},
            {"id":"P2-0-S","productId":"P2","name":null,"size":"S"}
        ]"#;
        let entries: Vec<WishlistEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "");
        assert_eq!(entries[0].sub_header, "");
        assert_eq!(entries[1].name, "");
    }
}
