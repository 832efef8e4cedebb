//! In-process storage used by service and handler tests. Mirrors the Postgres
//! constraints the services rely on: unique phone/email, foreign keys that
//! block deleting referenced categories and addresses, and all-or-nothing
//! checkout.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::application::checkout;
use crate::domain::address::{Address, AddressPatch, NewAddress};
use crate::domain::category::Category;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    LineItem, LineItemView, NewLineItem, NewOrder, NewPriceSnapshot, Order, OrderFilter,
    OrderRequest, OrderView, PriceSnapshot,
};
use crate::domain::page::{ListResult, PageRequest};
use crate::domain::ports::{
    AddressRepository, CategoryRepository, CheckoutTx, OrderRepository, ProductRepository,
    StoreRepository, UserRepository,
};
use crate::domain::product::{
    slugify, NewProduct, Product, ProductDetails, ProductFilter, ProductPatch, ProductPhoto,
};
use crate::domain::store::{Store, StoreFilter, StorePatch};
use crate::domain::user::{store_name_for, NewUser, User, UserPatch};

#[derive(Debug, Clone, Default)]
struct Tables {
    users: Vec<User>,
    stores: Vec<Store>,
    categories: Vec<Category>,
    products: Vec<Product>,
    photos: Vec<ProductPhoto>,
    addresses: Vec<Address>,
    snapshots: Vec<PriceSnapshot>,
    orders: Vec<Order>,
    line_items: Vec<LineItem>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

fn page_of<T>(items: Vec<T>, page: PageRequest) -> ListResult<T> {
    let total = items.len() as i64;
    let items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .collect();
    ListResult { items, total }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }

    pub fn seed_user(&self, name: &str, phone: &str, is_admin: bool) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            password_hash: String::new(),
            phone: phone.to_string(),
            email: format!("{phone}@example.com"),
            birth_date: String::new(),
            gender: String::new(),
            about: String::new(),
            job: String::new(),
            province_id: String::new(),
            city_id: String::new(),
            is_admin,
            created_at: now,
            updated_at: now,
        };
        self.lock().users.push(user.clone());
        user
    }

    pub fn seed_store(&self, user_id: Uuid) -> Store {
        let mut t = self.lock();
        let name = t
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| store_name_for(&u.name))
            .unwrap_or_else(|| "Store".to_string());
        let now = Utc::now();
        let store = Store {
            id: Uuid::new_v4(),
            user_id,
            name,
            photo_url: None,
            created_at: now,
            updated_at: now,
        };
        t.stores.push(store.clone());
        store
    }

    pub fn seed_category(&self, name: &str) -> Category {
        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.lock().categories.push(category.clone());
        category
    }

    pub fn seed_address(&self, user_id: Uuid) -> Address {
        let now = Utc::now();
        let address = Address {
            id: Uuid::new_v4(),
            user_id,
            title: "Rumah".to_string(),
            recipient_name: "Penerima".to_string(),
            phone: "0800".to_string(),
            detail: "Jl. Merdeka 1".to_string(),
            created_at: now,
            updated_at: now,
        };
        self.lock().addresses.push(address.clone());
        address
    }

    pub fn seed_product(&self, store_id: Uuid, category_id: Uuid, price: i64, stock: i32) -> Product {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let name = format!("Produk {}", &id.simple().to_string()[..6]);
        let product = Product {
            id,
            slug: slugify(&name),
            name,
            reseller_price: price,
            consumer_price: price,
            stock,
            description: String::new(),
            store_id,
            category_id,
            created_at: now,
            updated_at: now,
        };
        self.lock().products.push(product.clone());
        product
    }

    pub fn stock_of(&self, product_id: Uuid) -> Option<i32> {
        self.lock()
            .products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.stock)
    }

    pub fn store_of(&self, user_id: Uuid) -> Option<Store> {
        self.lock()
            .stores
            .iter()
            .find(|s| s.user_id == user_id)
            .cloned()
    }

    pub fn order_count(&self) -> usize {
        self.lock().orders.len()
    }

    pub fn line_item_count(&self) -> usize {
        self.lock().line_items.len()
    }

    pub fn snapshot_count(&self) -> usize {
        self.lock().snapshots.len()
    }
}

impl Tables {
    fn details(&self, product: &Product) -> ProductDetails {
        ProductDetails {
            product: product.clone(),
            photos: self
                .photos
                .iter()
                .filter(|p| p.product_id == product.id)
                .cloned()
                .collect(),
        }
    }

    fn replace_photos(&mut self, product_id: Uuid, urls: &[String]) {
        self.photos.retain(|p| p.product_id != product_id);
        let now = Utc::now();
        self.photos.extend(urls.iter().map(|url| ProductPhoto {
            id: Uuid::new_v4(),
            product_id,
            url: url.clone(),
            created_at: now,
            updated_at: now,
        }));
    }

    fn view(&self, order: &Order) -> Result<OrderView, DomainError> {
        let address = self
            .addresses
            .iter()
            .find(|a| a.id == order.address_id)
            .cloned()
            .ok_or_else(|| DomainError::Internal("order address missing".to_string()))?;
        let items = self
            .line_items
            .iter()
            .filter(|i| i.order_id == order.id)
            .map(|item| {
                let snapshot = self
                    .snapshots
                    .iter()
                    .find(|s| s.id == item.price_snapshot_id)
                    .cloned()
                    .ok_or_else(|| DomainError::Internal("snapshot missing".to_string()))?;
                Ok(LineItemView {
                    item: item.clone(),
                    price_snapshot: snapshot,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(OrderView::assemble(order.clone(), address, items))
    }
}

impl UserRepository for MemoryStore {
    fn create_with_store(&self, user: NewUser) -> Result<User, DomainError> {
        let mut t = self.lock();
        if t
            .users
            .iter()
            .any(|u| u.phone == user.phone || u.email == user.email)
        {
            return Err(DomainError::Conflict("duplicate value".to_string()));
        }
        let now = Utc::now();
        let store_name = user.store_name();
        let created = User {
            id: user.id,
            name: user.name,
            password_hash: user.password_hash,
            phone: user.phone,
            email: user.email,
            birth_date: user.birth_date,
            gender: user.gender,
            about: user.about,
            job: user.job,
            province_id: user.province_id,
            city_id: user.city_id,
            is_admin: user.is_admin,
            created_at: now,
            updated_at: now,
        };
        t.users.push(created.clone());
        t.stores.push(Store {
            id: Uuid::new_v4(),
            user_id: created.id,
            name: store_name,
            photo_url: None,
            created_at: now,
            updated_at: now,
        });
        Ok(created)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        Ok(self.lock().users.iter().find(|u| u.phone == phone).cloned())
    }

    fn find_by_phone_or_email(
        &self,
        phone: &str,
        email: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.phone == phone || u.email == email)
            .cloned())
    }

    fn update(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, DomainError> {
        let mut t = self.lock();
        let taken = t.users.iter().any(|u| {
            u.id != id
                && (patch.phone.as_deref() == Some(u.phone.as_str())
                    || patch.email.as_deref() == Some(u.email.as_str()))
        });
        if taken {
            return Err(DomainError::Conflict("duplicate value".to_string()));
        }
        let Some(user) = t.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        patch.apply(user);
        user.updated_at = Utc::now();
        let updated = user.clone();
        if let Some(name) = &patch.name {
            for store in t.stores.iter_mut().filter(|s| s.user_id == id) {
                store.name = store_name_for(name);
                store.updated_at = updated.updated_at;
            }
        }
        Ok(Some(updated))
    }
}

impl AddressRepository for MemoryStore {
    fn list(&self, user_id: Uuid, title: Option<&str>) -> Result<Vec<Address>, DomainError> {
        Ok(self
            .lock()
            .addresses
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter(|a| title.map_or(true, |t| contains_ci(&a.title, t)))
            .cloned()
            .collect())
    }

    fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<Address>, DomainError> {
        Ok(self
            .lock()
            .addresses
            .iter()
            .find(|a| a.id == id && a.user_id == user_id)
            .cloned())
    }

    fn create(&self, address: NewAddress) -> Result<Address, DomainError> {
        let now = Utc::now();
        let created = Address {
            id: address.id,
            user_id: address.user_id,
            title: address.title,
            recipient_name: address.recipient_name,
            phone: address.phone,
            detail: address.detail,
            created_at: now,
            updated_at: now,
        };
        self.lock().addresses.push(created.clone());
        Ok(created)
    }

    fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: &AddressPatch,
    ) -> Result<Option<Address>, DomainError> {
        let mut t = self.lock();
        Ok(t
            .addresses
            .iter_mut()
            .find(|a| a.id == id && a.user_id == user_id)
            .map(|a| {
                patch.apply(a);
                a.updated_at = Utc::now();
                a.clone()
            }))
    }

    fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let mut t = self.lock();
        let Some(pos) = t
            .addresses
            .iter()
            .position(|a| a.id == id && a.user_id == user_id)
        else {
            return Ok(false);
        };
        if t.orders.iter().any(|o| o.address_id == id) {
            return Err(DomainError::Conflict(
                "address is referenced by an order".to_string(),
            ));
        }
        t.addresses.remove(pos);
        Ok(true)
    }
}

impl StoreRepository for MemoryStore {
    fn list(
        &self,
        filter: &StoreFilter,
        page: PageRequest,
    ) -> Result<ListResult<Store>, DomainError> {
        let stores = self
            .lock()
            .stores
            .iter()
            .filter(|s| filter.name.as_deref().map_or(true, |n| contains_ci(&s.name, n)))
            .cloned()
            .collect();
        Ok(page_of(stores, page))
    }

    fn find(&self, id: Uuid) -> Result<Option<Store>, DomainError> {
        Ok(self.lock().stores.iter().find(|s| s.id == id).cloned())
    }

    fn find_by_owner(&self, user_id: Uuid) -> Result<Option<Store>, DomainError> {
        Ok(self.store_of(user_id))
    }

    fn update(&self, id: Uuid, patch: &StorePatch) -> Result<Option<Store>, DomainError> {
        let mut t = self.lock();
        Ok(t.stores.iter_mut().find(|s| s.id == id).map(|s| {
            patch.apply(s);
            s.updated_at = Utc::now();
            s.clone()
        }))
    }
}

impl CategoryRepository for MemoryStore {
    fn list(&self) -> Result<Vec<Category>, DomainError> {
        let mut categories = self.lock().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    fn find(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        Ok(self.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    fn create(&self, id: Uuid, name: &str) -> Result<Category, DomainError> {
        let now = Utc::now();
        let category = Category {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.lock().categories.push(category.clone());
        Ok(category)
    }

    fn rename(&self, id: Uuid, name: &str) -> Result<Option<Category>, DomainError> {
        let mut t = self.lock();
        Ok(t.categories.iter_mut().find(|c| c.id == id).map(|c| {
            c.name = name.to_string();
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut t = self.lock();
        if t.products.iter().any(|p| p.category_id == id) {
            return Err(DomainError::Conflict(
                "category is referenced by products".to_string(),
            ));
        }
        let before = t.categories.len();
        t.categories.retain(|c| c.id != id);
        Ok(t.categories.len() < before)
    }
}

impl ProductRepository for MemoryStore {
    fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<ListResult<ProductDetails>, DomainError> {
        let t = self.lock();
        let products = t
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .map(|p| t.details(p))
            .collect();
        Ok(page_of(products, page))
    }

    fn find(&self, id: Uuid) -> Result<Option<ProductDetails>, DomainError> {
        let t = self.lock();
        Ok(t.products.iter().find(|p| p.id == id).map(|p| t.details(p)))
    }

    fn create(&self, product: NewProduct) -> Result<ProductDetails, DomainError> {
        let mut t = self.lock();
        if !t.categories.iter().any(|c| c.id == product.category_id) {
            return Err(DomainError::Conflict("unknown category".to_string()));
        }
        let now = Utc::now();
        let created = Product {
            id: product.id,
            name: product.name,
            slug: product.slug,
            reseller_price: product.reseller_price,
            consumer_price: product.consumer_price,
            stock: product.stock,
            description: product.description,
            store_id: product.store_id,
            category_id: product.category_id,
            created_at: now,
            updated_at: now,
        };
        t.products.push(created.clone());
        t.replace_photos(created.id, &product.photos);
        Ok(t.details(&created))
    }

    fn update(
        &self,
        id: Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<ProductDetails>, DomainError> {
        let mut t = self.lock();
        let Some(product) = t.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        patch.apply(product);
        product.updated_at = Utc::now();
        let updated = product.clone();
        if let Some(urls) = &patch.photos {
            t.replace_photos(id, urls);
        }
        Ok(Some(t.details(&updated)))
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut t = self.lock();
        let before = t.products.len();
        t.products.retain(|p| p.id != id);
        t.photos.retain(|p| p.product_id != id);
        Ok(t.products.len() < before)
    }
}

/// Checkout against a scratch copy of the tables; the copy replaces the
/// originals only when the whole checkout succeeds.
struct MemoryTx<'a> {
    tables: &'a mut Tables,
}

impl CheckoutTx for MemoryTx<'_> {
    fn find_address(&mut self, user_id: Uuid, id: Uuid) -> Result<Option<Address>, DomainError> {
        Ok(self
            .tables
            .addresses
            .iter()
            .find(|a| a.id == id && a.user_id == user_id)
            .cloned())
    }

    fn find_product(&mut self, id: Uuid) -> Result<Option<Product>, DomainError> {
        Ok(self.tables.products.iter().find(|p| p.id == id).cloned())
    }

    fn snapshot_for(&mut self, product: &Product) -> Result<PriceSnapshot, DomainError> {
        if let Some(existing) = self
            .tables
            .snapshots
            .iter()
            .find(|s| s.product_id == product.id)
        {
            return Ok(existing.clone());
        }
        let fresh = NewPriceSnapshot::of(product);
        let now = Utc::now();
        let snapshot = PriceSnapshot {
            id: fresh.id,
            product_id: fresh.product_id,
            name: fresh.name,
            slug: fresh.slug,
            reseller_price: fresh.reseller_price,
            consumer_price: fresh.consumer_price,
            description: fresh.description,
            store_id: fresh.store_id,
            category_id: fresh.category_id,
            created_at: now,
            updated_at: now,
        };
        self.tables.snapshots.push(snapshot.clone());
        Ok(snapshot)
    }

    fn decrement_stock(&mut self, product_id: Uuid, quantity: i32) -> Result<bool, DomainError> {
        match self
            .tables
            .products
            .iter_mut()
            .find(|p| p.id == product_id && p.stock >= quantity)
        {
            Some(product) => {
                product.stock -= quantity;
                product.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn insert_order(&mut self, order: &NewOrder) -> Result<(), DomainError> {
        let now = Utc::now();
        self.tables.orders.push(Order {
            id: order.id,
            user_id: order.user_id,
            address_id: order.address_id,
            total_price: 0,
            invoice_code: order.invoice_code.clone(),
            payment_method: order.payment_method.clone(),
            created_at: now,
            updated_at: now,
        });
        Ok(())
    }

    fn insert_line_item(&mut self, item: &NewLineItem) -> Result<LineItem, DomainError> {
        let now = Utc::now();
        let created = LineItem {
            id: item.id,
            order_id: item.order_id,
            price_snapshot_id: item.price_snapshot_id,
            store_id: item.store_id,
            quantity: item.quantity,
            line_total: item.line_total,
            created_at: now,
            updated_at: now,
        };
        self.tables.line_items.push(created.clone());
        Ok(created)
    }

    fn finalize_order(&mut self, order_id: Uuid, total_price: i64) -> Result<Order, DomainError> {
        let order = self
            .tables
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(DomainError::NotFound("Order"))?;
        order.total_price = total_price;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }
}

impl OrderRepository for MemoryStore {
    fn place(&self, user_id: Uuid, request: &OrderRequest) -> Result<OrderView, DomainError> {
        let mut t = self.lock();
        let mut scratch = t.clone();
        let view = checkout::place_order(
            &mut MemoryTx {
                tables: &mut scratch,
            },
            user_id,
            request,
        )?;
        *t = scratch;
        Ok(view)
    }

    fn find_for_user(&self, user_id: Uuid, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let t = self.lock();
        t.orders
            .iter()
            .find(|o| o.id == id && o.user_id == user_id)
            .map(|o| t.view(o))
            .transpose()
    }

    fn list_for_user(
        &self,
        user_id: Uuid,
        filter: &OrderFilter,
        page: PageRequest,
    ) -> Result<ListResult<OrderView>, DomainError> {
        let t = self.lock();
        let views = t
            .orders
            .iter()
            .rev()
            .filter(|o| o.user_id == user_id)
            .filter(|o| {
                filter
                    .search
                    .as_deref()
                    .map_or(true, |s| contains_ci(&o.invoice_code, s))
            })
            .map(|o| t.view(o))
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(page_of(views, page))
    }
}
