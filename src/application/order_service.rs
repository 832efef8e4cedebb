use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{OrderFilter, OrderRequest, OrderView};
use crate::domain::page::{ListResult, PageRequest};
use crate::domain::ports::OrderRepository;

#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    pub fn place_order(
        &self,
        user_id: Uuid,
        request: OrderRequest,
    ) -> Result<OrderView, DomainError> {
        match self.repo.place(user_id, &request) {
            Ok(order) => {
                info!(
                    "order {} ({}) placed by user {}: {} item(s), total {}",
                    order.id,
                    order.invoice_code,
                    user_id,
                    order.items.len(),
                    order.total_price
                );
                Ok(order)
            }
            Err(e) => {
                warn!("order by user {} rejected: {}", user_id, e);
                Err(e)
            }
        }
    }

    pub fn get_order(&self, user_id: Uuid, id: Uuid) -> Result<OrderView, DomainError> {
        self.repo
            .find_for_user(user_id, id)?
            .ok_or(DomainError::NotFound("Order"))
    }

    pub fn list_orders(
        &self,
        user_id: Uuid,
        filter: &OrderFilter,
        page: PageRequest,
    ) -> Result<ListResult<OrderView>, DomainError> {
        self.repo.list_for_user(user_id, filter, page)
    }
}
