pub mod address_service;
pub mod auth_service;
pub mod category_service;
pub mod checkout;
pub mod order_service;
pub mod product_service;
pub mod store_service;
pub mod user_service;
