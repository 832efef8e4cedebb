pub mod address;
pub mod category;
pub mod errors;
pub mod order;
pub mod page;
pub mod ports;
pub mod product;
pub mod store;
pub mod user;
