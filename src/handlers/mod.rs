pub mod addresses;
pub mod auth;
pub mod categories;
pub mod orders;
pub mod products;
pub mod stores;
pub mod users;

use actix_web::web;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::errors::DomainError;
use crate::domain::page::PageRequest;
use crate::errors::AppError;

/// `page` (1-based, default 1) and `limit` (default 10, max 100).
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// Runs blocking repository work on actix's thread pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    Ok(web::block(f).await??)
}
