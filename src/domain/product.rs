use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::{require_non_empty, DomainError};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub reseller_price: i64,
    pub consumer_price: i64,
    pub stock: i32,
    pub description: String,
    pub store_id: Uuid,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductPhoto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub photos: Vec<ProductPhoto>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub reseller_price: i64,
    pub consumer_price: i64,
    pub stock: i32,
    pub description: String,
    pub store_id: Uuid,
    pub category_id: Uuid,
    pub photos: Vec<String>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("name", &self.name)?;
        check_price("reseller_price", self.reseller_price)?;
        check_price("consumer_price", self.consumer_price)?;
        check_stock(self.stock)?;
        check_photos(&self.photos)
    }
}

/// Product changes. A `Some` photo list replaces every existing photo.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub reseller_price: Option<i64>,
    pub consumer_price: Option<i64>,
    pub stock: Option<i32>,
    pub category_id: Option<Uuid>,
    pub photos: Option<Vec<String>>,
}

impl ProductPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(price) = self.reseller_price {
            check_price("reseller_price", price)?;
        }
        if let Some(price) = self.consumer_price {
            check_price("consumer_price", price)?;
        }
        if let Some(stock) = self.stock {
            check_stock(stock)?;
        }
        if let Some(photos) = &self.photos {
            check_photos(photos)?;
        }
        Ok(())
    }

    /// Slug that accompanies a rename, if any.
    pub fn slug(&self) -> Option<String> {
        self.name.as_deref().map(slugify)
    }

    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
            product.slug = slugify(name);
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.reseller_price {
            product.reseller_price = price;
        }
        if let Some(price) = self.consumer_price {
            product.consumer_price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(category_id) = self.category_id {
            product.category_id = category_id;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub category_id: Option<Uuid>,
    pub store_id: Option<Uuid>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let name_ok = self.name.as_deref().map_or(true, |n| {
            product.name.to_lowercase().contains(&n.to_lowercase())
        });
        name_ok
            && self.category_id.map_or(true, |id| product.category_id == id)
            && self.store_id.map_or(true, |id| product.store_id == id)
            && self.min_price.map_or(true, |p| product.consumer_price >= p)
            && self.max_price.map_or(true, |p| product.consumer_price <= p)
    }
}

fn check_price(field: &str, price: i64) -> Result<(), DomainError> {
    if price < 0 {
        return Err(DomainError::invalid(format!("{field} must not be negative")));
    }
    Ok(())
}

fn check_stock(stock: i32) -> Result<(), DomainError> {
    if stock < 0 {
        return Err(DomainError::invalid("stock must not be negative"));
    }
    Ok(())
}

fn check_photos(photos: &[String]) -> Result<(), DomainError> {
    if photos.iter().any(|url| url.trim().is_empty()) {
        return Err(DomainError::invalid("photo urls must not be empty"));
    }
    Ok(())
}

/// Lowercase ASCII slug: alphanumerics kept, every other run collapsed to one `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
