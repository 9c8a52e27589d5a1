use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

pub const VALID_GENDERS: [&str; 4] = ["men", "women", "kid", "unisex"];

/// Canonical product row. Image URLs live in `product_images` and are
/// loaded explicitly by every read path that returns a product.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub price: f64,
    pub description: Option<String>,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub gender: String,
    pub tags: Vec<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductImage {
    pub id: i64,
    pub url: String,
    pub product_id: Uuid,
}

/// A product together with its structured image rows.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithImages {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<ProductImage>,
}

/// Caller-facing shape: image rows flattened to a plain list of URLs.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPlain {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<String>,
}

impl ProductWithImages {
    pub fn into_plain(self) -> ProductPlain {
        ProductPlain {
            product: self.product,
            images: self.images.into_iter().map(|img| img.url).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    pub description: Option<String>,
    pub slug: Option<String>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
    #[validate(length(min = 1, message = "At least one size is required"))]
    pub sizes: Vec<String>,
    pub gender: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Partial update; a supplied image list replaces every stored image.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductPatch {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    pub description: Option<String>,
    pub slug: Option<String>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
    #[validate(length(min = 1, message = "At least one size is required"))]
    pub sizes: Option<Vec<String>>,
    pub gender: Option<String>,
    pub tags: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

/// Slug rule applied on every insert and update that touches it:
/// lowercase, spaces become underscores, apostrophes are stripped.
pub fn normalize_slug(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "_").replace('\'', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_derived_from_title() {
        assert_eq!(normalize_slug("Blue Hat"), "blue_hat");
        assert_eq!(normalize_slug("T-Shirt Teslo"), "t-shirt_teslo");
    }

    #[test]
    fn slug_strips_apostrophes() {
        assert_eq!(normalize_slug("Men's Chill Crew Neck"), "mens_chill_crew_neck");
    }

    #[test]
    fn slug_already_normalized_is_unchanged() {
        assert_eq!(normalize_slug("t_shirt_teslo"), "t_shirt_teslo");
    }

    #[test]
    fn new_product_requires_sizes() {
        let product = NewProduct {
            title: "Blue Hat".into(),
            price: Some(20.0),
            description: None,
            slug: None,
            stock: None,
            sizes: vec![],
            gender: "unisex".into(),
            tags: vec![],
            images: vec![],
        };
        assert!(product.validate().is_err());
    }

    #[test]
    fn new_product_rejects_negative_price_and_stock() {
        let product = NewProduct {
            title: "Blue Hat".into(),
            price: Some(-1.0),
            description: None,
            slug: None,
            stock: Some(-3),
            sizes: vec!["S".into()],
            gender: "unisex".into(),
            tags: vec![],
            images: vec![],
        };
        let errors = product.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
        assert!(errors.field_errors().contains_key("stock"));
    }

    #[test]
    fn patch_with_no_fields_is_valid() {
        assert!(ProductPatch::default().validate().is_ok());
    }
}
