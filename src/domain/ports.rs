use uuid::Uuid;

use super::address::{Address, AddressPatch, NewAddress};
use super::category::Category;
use super::errors::DomainError;
use super::order::{
    LineItem, NewLineItem, NewOrder, Order, OrderFilter, OrderRequest, OrderView, PriceSnapshot,
};
use super::page::{ListResult, PageRequest};
use super::product::{NewProduct, Product, ProductDetails, ProductFilter, ProductPatch};
use super::store::{Store, StoreFilter, StorePatch};
use super::user::{NewUser, User, UserPatch};

pub trait UserRepository: Send + Sync + 'static {
    /// Inserts the user and their store atomically.
    fn create_with_store(&self, user: NewUser) -> Result<User, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;
    fn find_by_phone_or_email(&self, phone: &str, email: &str)
        -> Result<Option<User>, DomainError>;
    /// Applies the patch; a name change also renames the user's store.
    fn update(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, DomainError>;
}

pub trait AddressRepository: Send + Sync + 'static {
    fn list(&self, user_id: Uuid, title: Option<&str>) -> Result<Vec<Address>, DomainError>;
    fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<Address>, DomainError>;
    fn create(&self, address: NewAddress) -> Result<Address, DomainError>;
    fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: &AddressPatch,
    ) -> Result<Option<Address>, DomainError>;
    fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError>;
}

pub trait StoreRepository: Send + Sync + 'static {
    fn list(&self, filter: &StoreFilter, page: PageRequest)
        -> Result<ListResult<Store>, DomainError>;
    fn find(&self, id: Uuid) -> Result<Option<Store>, DomainError>;
    fn find_by_owner(&self, user_id: Uuid) -> Result<Option<Store>, DomainError>;
    fn update(&self, id: Uuid, patch: &StorePatch) -> Result<Option<Store>, DomainError>;
}

pub trait CategoryRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<Category>, DomainError>;
    fn find(&self, id: Uuid) -> Result<Option<Category>, DomainError>;
    fn create(&self, id: Uuid, name: &str) -> Result<Category, DomainError>;
    fn rename(&self, id: Uuid, name: &str) -> Result<Option<Category>, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<ListResult<ProductDetails>, DomainError>;
    fn find(&self, id: Uuid) -> Result<Option<ProductDetails>, DomainError>;
    fn create(&self, product: NewProduct) -> Result<ProductDetails, DomainError>;
    fn update(&self, id: Uuid, patch: &ProductPatch)
        -> Result<Option<ProductDetails>, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Runs the whole checkout in one atomic unit of work.
    fn place(&self, user_id: Uuid, request: &OrderRequest) -> Result<OrderView, DomainError>;
    fn find_for_user(&self, user_id: Uuid, id: Uuid) -> Result<Option<OrderView>, DomainError>;
    fn list_for_user(
        &self,
        user_id: Uuid,
        filter: &OrderFilter,
        page: PageRequest,
    ) -> Result<ListResult<OrderView>, DomainError>;
}

/// Storage operations available inside one checkout transaction. Everything
/// done through a `CheckoutTx` commits or rolls back together.
pub trait CheckoutTx {
    fn find_address(&mut self, user_id: Uuid, id: Uuid) -> Result<Option<Address>, DomainError>;
    fn find_product(&mut self, id: Uuid) -> Result<Option<Product>, DomainError>;
    /// Returns the product's snapshot, creating it on first sale. Existing
    /// snapshots are never modified.
    fn snapshot_for(&mut self, product: &Product) -> Result<PriceSnapshot, DomainError>;
    /// Conditionally decrements stock; `false` when fewer than `quantity` units remain.
    fn decrement_stock(&mut self, product_id: Uuid, quantity: i32) -> Result<bool, DomainError>;
    fn insert_order(&mut self, order: &NewOrder) -> Result<(), DomainError>;
    fn insert_line_item(&mut self, item: &NewLineItem) -> Result<LineItem, DomainError>;
    fn finalize_order(&mut self, order_id: Uuid, total_price: i64) -> Result<Order, DomainError>;
}
