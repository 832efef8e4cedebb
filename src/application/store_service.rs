use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::page::{ListResult, PageRequest};
use crate::domain::ports::{ProductRepository, StoreRepository};
use crate::domain::product::ProductFilter;
use crate::domain::store::{Store, StoreDetails, StoreFilter, StorePatch};

#[derive(Clone)]
pub struct StoreService {
    stores: Arc<dyn StoreRepository>,
    products: Arc<dyn ProductRepository>,
}

impl StoreService {
    pub fn new(stores: Arc<dyn StoreRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { stores, products }
    }

    pub fn list(
        &self,
        filter: &StoreFilter,
        page: PageRequest,
    ) -> Result<ListResult<Store>, DomainError> {
        self.stores.list(filter, page)
    }

    pub fn get(&self, id: Uuid) -> Result<Store, DomainError> {
        self.stores.find(id)?.ok_or(DomainError::NotFound("Store"))
    }

    /// The caller's store together with all of its products.
    pub fn mine(&self, user_id: Uuid) -> Result<StoreDetails, DomainError> {
        let store = self
            .stores
            .find_by_owner(user_id)?
            .ok_or(DomainError::NotFound("Store"))?;
        let filter = ProductFilter {
            store_id: Some(store.id),
            ..Default::default()
        };
        let mut products = Vec::new();
        let mut page = PageRequest::new(Some(1), Some(crate::domain::page::MAX_LIMIT));
        loop {
            let batch = self.products.list(&filter, page)?;
            let fetched = batch.items.len() as i64;
            products.extend(batch.items);
            if fetched < page.limit || products.len() as i64 >= batch.total {
                break;
            }
            page.page += 1;
        }
        Ok(StoreDetails { store, products })
    }

    pub fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: StorePatch,
    ) -> Result<Store, DomainError> {
        patch.validate()?;
        let store = self.get(id)?;
        if store.user_id != user_id {
            return Err(DomainError::Forbidden(
                "only the store owner may change it".to_string(),
            ));
        }
        self.stores
            .update(id, &patch)?
            .ok_or(DomainError::NotFound("Store"))
    }
}
