use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::address::{Address, AddressPatch, NewAddress};
use crate::domain::category::Category;
use crate::domain::order::{LineItem, NewLineItem, NewOrder, NewPriceSnapshot, Order, PriceSnapshot};
use crate::domain::product::{NewProduct, Product, ProductPatch, ProductPhoto};
use crate::domain::store::{Store, StorePatch};
use crate::domain::user::{NewUser, User, UserPatch};
use crate::schema::{
    addresses, categories, order_items, orders, price_snapshots, product_photos, products, stores,
    users,
};

// ── users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub password_hash: String,
    pub phone: String,
    pub email: String,
    pub birth_date: String,
    pub gender: String,
    pub about: String,
    pub job: String,
    pub province_id: String,
    pub city_id: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            name: r.name,
            password_hash: r.password_hash,
            phone: r.phone,
            email: r.email,
            birth_date: r.birth_date,
            gender: r.gender,
            about: r.about,
            job: r.job,
            province_id: r.province_id,
            city_id: r.city_id,
            is_admin: r.is_admin,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub birth_date: &'a str,
    pub gender: &'a str,
    pub about: &'a str,
    pub job: &'a str,
    pub province_id: &'a str,
    pub city_id: &'a str,
    pub is_admin: bool,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(u: &'a NewUser) -> Self {
        NewUserRow {
            id: u.id,
            name: &u.name,
            password_hash: &u.password_hash,
            phone: &u.phone,
            email: &u.email,
            birth_date: &u.birth_date,
            gender: &u.gender,
            about: &u.about,
            job: &u.job,
            province_id: &u.province_id,
            city_id: &u.city_id,
            is_admin: u.is_admin,
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangeset<'a> {
    pub name: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub birth_date: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub about: Option<&'a str>,
    pub job: Option<&'a str>,
    pub province_id: Option<&'a str>,
    pub city_id: Option<&'a str>,
    pub is_admin: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a UserPatch> for UserChangeset<'a> {
    fn from(p: &'a UserPatch) -> Self {
        UserChangeset {
            name: p.name.as_deref(),
            password_hash: p.password_hash.as_deref(),
            phone: p.phone.as_deref(),
            email: p.email.as_deref(),
            birth_date: p.birth_date.as_deref(),
            gender: p.gender.as_deref(),
            about: p.about.as_deref(),
            job: p.job.as_deref(),
            province_id: p.province_id.as_deref(),
            city_id: p.city_id.as_deref(),
            is_admin: p.is_admin,
            updated_at: Utc::now(),
        }
    }
}

// ── stores ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = stores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StoreRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(r: StoreRow) -> Self {
        Store {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            photo_url: r.photo_url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = stores)]
pub struct NewStoreRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = stores)]
pub struct StoreChangeset<'a> {
    pub name: Option<&'a str>,
    pub photo_url: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a StorePatch> for StoreChangeset<'a> {
    fn from(p: &'a StorePatch) -> Self {
        StoreChangeset {
            name: p.name.as_deref(),
            photo_url: p.photo_url.as_deref(),
            updated_at: Utc::now(),
        }
    }
}

// ── categories ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Category {
            id: r.id,
            name: r.name,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
}

// ── products ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
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

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Product {
            id: r.id,
            name: r.name,
            slug: r.slug,
            reseller_price: r.reseller_price,
            consumer_price: r.consumer_price,
            stock: r.stock,
            description: r.description,
            store_id: r.store_id,
            category_id: r.category_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub slug: &'a str,
    pub reseller_price: i64,
    pub consumer_price: i64,
    pub stock: i32,
    pub description: &'a str,
    pub store_id: Uuid,
    pub category_id: Uuid,
}

impl<'a> From<&'a NewProduct> for NewProductRow<'a> {
    fn from(p: &'a NewProduct) -> Self {
        NewProductRow {
            id: p.id,
            name: &p.name,
            slug: &p.slug,
            reseller_price: p.reseller_price,
            consumer_price: p.consumer_price,
            stock: p.stock,
            description: &p.description,
            store_id: p.store_id,
            category_id: p.category_id,
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = products)]
pub struct ProductChangeset {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub reseller_price: Option<i64>,
    pub consumer_price: Option<i64>,
    pub stock: Option<i32>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ProductPatch> for ProductChangeset {
    fn from(p: &ProductPatch) -> Self {
        ProductChangeset {
            name: p.name.clone(),
            slug: p.slug(),
            reseller_price: p.reseller_price,
            consumer_price: p.consumer_price,
            stock: p.stock,
            description: p.description.clone(),
            category_id: p.category_id,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = product_photos)]
#[diesel(belongs_to(ProductRow, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductPhotoRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductPhotoRow> for ProductPhoto {
    fn from(r: ProductPhotoRow) -> Self {
        ProductPhoto {
            id: r.id,
            product_id: r.product_id,
            url: r.url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = product_photos)]
pub struct NewProductPhotoRow<'a> {
    pub id: Uuid,
    pub product_id: Uuid,
    pub url: &'a str,
}

// ── addresses ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AddressRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub recipient_name: String,
    pub phone: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AddressRow> for Address {
    fn from(r: AddressRow) -> Self {
        Address {
            id: r.id,
            user_id: r.user_id,
            title: r.title,
            recipient_name: r.recipient_name,
            phone: r.phone,
            detail: r.detail,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = addresses)]
pub struct NewAddressRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: &'a str,
    pub recipient_name: &'a str,
    pub phone: &'a str,
    pub detail: &'a str,
}

impl<'a> From<&'a NewAddress> for NewAddressRow<'a> {
    fn from(a: &'a NewAddress) -> Self {
        NewAddressRow {
            id: a.id,
            user_id: a.user_id,
            title: &a.title,
            recipient_name: &a.recipient_name,
            phone: &a.phone,
            detail: &a.detail,
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = addresses)]
pub struct AddressChangeset<'a> {
    pub title: Option<&'a str>,
    pub recipient_name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub detail: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a AddressPatch> for AddressChangeset<'a> {
    fn from(p: &'a AddressPatch) -> Self {
        AddressChangeset {
            title: p.title.as_deref(),
            recipient_name: p.recipient_name.as_deref(),
            phone: p.phone.as_deref(),
            detail: p.detail.as_deref(),
            updated_at: Utc::now(),
        }
    }
}

// ── orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = price_snapshots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PriceSnapshotRow {
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

impl From<PriceSnapshotRow> for PriceSnapshot {
    fn from(r: PriceSnapshotRow) -> Self {
        PriceSnapshot {
            id: r.id,
            product_id: r.product_id,
            name: r.name,
            slug: r.slug,
            reseller_price: r.reseller_price,
            consumer_price: r.consumer_price,
            description: r.description,
            store_id: r.store_id,
            category_id: r.category_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = price_snapshots)]
pub struct NewPriceSnapshotRow<'a> {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: &'a str,
    pub slug: &'a str,
    pub reseller_price: i64,
    pub consumer_price: i64,
    pub description: &'a str,
    pub store_id: Uuid,
    pub category_id: Uuid,
}

impl<'a> From<&'a NewPriceSnapshot> for NewPriceSnapshotRow<'a> {
    fn from(s: &'a NewPriceSnapshot) -> Self {
        NewPriceSnapshotRow {
            id: s.id,
            product_id: s.product_id,
            name: &s.name,
            slug: &s.slug,
            reseller_price: s.reseller_price,
            consumer_price: s.consumer_price,
            description: &s.description,
            store_id: s.store_id,
            category_id: s.category_id,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_id: Uuid,
    pub total_price: i64,
    pub invoice_code: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(r: OrderRow) -> Self {
        Order {
            id: r.id,
            user_id: r.user_id,
            address_id: r.address_id,
            total_price: r.total_price,
            invoice_code: r.invoice_code,
            payment_method: r.payment_method,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_id: Uuid,
    pub invoice_code: &'a str,
    pub payment_method: &'a str,
}

impl<'a> From<&'a NewOrder> for NewOrderRow<'a> {
    fn from(o: &'a NewOrder) -> Self {
        NewOrderRow {
            id: o.id,
            user_id: o.user_id,
            address_id: o.address_id,
            invoice_code: &o.invoice_code,
            payment_method: &o.payment_method,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub price_snapshot_id: Uuid,
    pub store_id: Uuid,
    pub quantity: i32,
    pub line_total: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderItemRow> for LineItem {
    fn from(r: OrderItemRow) -> Self {
        LineItem {
            id: r.id,
            order_id: r.order_id,
            price_snapshot_id: r.price_snapshot_id,
            store_id: r.store_id,
            quantity: r.quantity,
            line_total: r.line_total,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub price_snapshot_id: Uuid,
    pub store_id: Uuid,
    pub quantity: i32,
    pub line_total: i64,
}

impl From<&NewLineItem> for NewOrderItemRow {
    fn from(i: &NewLineItem) -> Self {
        NewOrderItemRow {
            id: i.id,
            order_id: i.order_id,
            price_snapshot_id: i.price_snapshot_id,
            store_id: i.store_id,
            quantity: i.quantity,
            line_total: i.line_total,
        }
    }
}
