use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::address::Address;
use super::errors::{require_non_empty, DomainError};
use super::product::Product;

#[derive(Debug, Clone)]
pub struct OrderItemInput {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub payment_method: String,
    pub address_id: Uuid,
    pub items: Vec<OrderItemInput>,
}

impl OrderRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("payment_method", &self.payment_method)?;
        if self.items.is_empty() {
            return Err(DomainError::invalid("order must contain at least one item"));
        }
        if let Some(item) = self.items.iter().find(|i| i.quantity <= 0) {
            return Err(DomainError::invalid(format!(
                "quantity for product {} must be positive",
                item.product_id
            )));
        }
        Ok(())
    }
}

/// Immutable copy of a product's pricing at its first sale.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PriceSnapshot {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub slug: String,
    pub reseller_price: i64,
    pub consumer_price: i64,
    pub description: String,
    pub store_id: Uuid,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPriceSnapshot {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub slug: String,
    pub reseller_price: i64,
    pub consumer_price: i64,
    pub description: String,
    pub store_id: Uuid,
    pub category_id: Uuid,
}

impl NewPriceSnapshot {
    pub fn of(product: &Product) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: product.id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            reseller_price: product.reseller_price,
            consumer_price: product.consumer_price,
            description: product.description.clone(),
            store_id: product.store_id,
            category_id: product.category_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_id: Uuid,
    pub total_price: i64,
    pub invoice_code: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_id: Uuid,
    pub invoice_code: String,
    pub payment_method: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LineItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub price_snapshot_id: Uuid,
    pub store_id: Uuid,
    pub quantity: i32,
    pub line_total: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub price_snapshot_id: Uuid,
    pub store_id: Uuid,
    pub quantity: i32,
    pub line_total: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LineItemView {
    #[serde(flatten)]
    pub item: LineItem,
    pub price_snapshot: PriceSnapshot,
}

/// A finalized order as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_price: i64,
    pub invoice_code: String,
    pub payment_method: String,
    pub shipping_address: Address,
    pub items: Vec<LineItemView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderView {
    pub fn assemble(order: Order, shipping_address: Address, items: Vec<LineItemView>) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            total_price: order.total_price,
            invoice_code: order.invoice_code,
            payment_method: order.payment_method,
            shipping_address,
            items,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Substring of the invoice code.
    pub search: Option<String>,
}

/// `unit_price × quantity`, failing instead of wrapping.
pub fn line_total(unit_price: i64, quantity: i32) -> Result<i64, DomainError> {
    unit_price
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| DomainError::invalid("line total overflows"))
}

pub fn order_total(line_totals: impl IntoIterator<Item = i64>) -> Result<i64, DomainError> {
    line_totals
        .into_iter()
        .try_fold(0i64, |acc, t| acc.checked_add(t))
        .ok_or_else(|| DomainError::invalid("order total overflows"))
}

/// `INV-<yyyymmddHHMMSS>-<8 random hex>`; the random tail keeps codes
/// distinct within the same second.
pub fn invoice_code(now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "INV-{}-{}",
        now.format("%Y%m%d%H%M%S"),
        random[..8].to_uppercase()
    )
}
