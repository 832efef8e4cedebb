use std::sync::Arc;

use crate::application::address_service::AddressService;
use crate::application::auth_service::AuthService;
use crate::application::category_service::CategoryService;
use crate::application::order_service::OrderService;
use crate::application::product_service::ProductService;
use crate::application::store_service::StoreService;
use crate::application::user_service::UserService;
use crate::auth::{PasswordHasher, TokenIssuer};
use crate::db::DbPool;
use crate::domain::ports::{
    AddressRepository, CategoryRepository, OrderRepository, ProductRepository, StoreRepository,
    UserRepository,
};
use crate::infrastructure::address_repo::DieselAddressRepository;
use crate::infrastructure::category_repo::DieselCategoryRepository;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::product_repo::DieselProductRepository;
use crate::infrastructure::store_repo::DieselStoreRepository;
use crate::infrastructure::user_repo::DieselUserRepository;

/// One adapter per port.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub stores: Arc<dyn StoreRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    pub fn diesel(pool: DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            addresses: Arc::new(DieselAddressRepository::new(pool.clone())),
            stores: Arc::new(DieselStoreRepository::new(pool.clone())),
            categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
            products: Arc::new(DieselProductRepository::new(pool.clone())),
            orders: Arc::new(DieselOrderRepository::new(pool)),
        }
    }

    #[cfg(test)]
    pub fn memory(store: Arc<crate::infrastructure::memory::MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            addresses: store.clone(),
            stores: store.clone(),
            categories: store.clone(),
            products: store.clone(),
            orders: store,
        }
    }
}

/// Shared by every worker through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub tokens: TokenIssuer,
    pub auth: AuthService,
    pub users: UserService,
    pub addresses: AddressService,
    pub stores: StoreService,
    pub categories: CategoryService,
    pub products: ProductService,
    pub orders: OrderService,
}

impl AppState {
    pub fn new(repos: Repositories, tokens: TokenIssuer, hasher: PasswordHasher) -> Self {
        Self {
            auth: AuthService::new(repos.users.clone(), hasher, tokens.clone()),
            users: UserService::new(repos.users.clone(), hasher),
            addresses: AddressService::new(repos.addresses),
            stores: StoreService::new(repos.stores.clone(), repos.products.clone()),
            categories: CategoryService::new(repos.categories.clone(), repos.users),
            products: ProductService::new(repos.products, repos.stores, repos.categories),
            orders: OrderService::new(repos.orders),
            tokens,
        }
    }
}
