use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::page::{ListResult, PageRequest};
use crate::domain::ports::{CategoryRepository, ProductRepository, StoreRepository};
use crate::domain::product::{slugify, NewProduct, ProductDetails, ProductFilter, ProductPatch};

#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub reseller_price: i64,
    pub consumer_price: i64,
    pub stock: i32,
    pub category_id: Uuid,
    pub photos: Vec<String>,
}

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    stores: Arc<dyn StoreRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        stores: Arc<dyn StoreRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            stores,
            categories,
        }
    }

    pub fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<ListResult<ProductDetails>, DomainError> {
        self.products.list(filter, page)
    }

    pub fn get(&self, id: Uuid) -> Result<ProductDetails, DomainError> {
        self.products
            .find(id)?
            .ok_or(DomainError::NotFound("Product"))
    }

    /// Adds a product to the caller's store.
    pub fn create(&self, caller: Uuid, input: ProductInput) -> Result<ProductDetails, DomainError> {
        let store = self.stores.find_by_owner(caller)?.ok_or_else(|| {
            DomainError::Forbidden("only store owners may add products".to_string())
        })?;
        self.ensure_category(input.category_id)?;

        let product = NewProduct {
            id: Uuid::new_v4(),
            slug: slugify(&input.name),
            name: input.name,
            reseller_price: input.reseller_price,
            consumer_price: input.consumer_price,
            stock: input.stock,
            description: input.description,
            store_id: store.id,
            category_id: input.category_id,
            photos: input.photos,
        };
        product.validate()?;
        self.products.create(product)
    }

    pub fn update(
        &self,
        caller: Uuid,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<ProductDetails, DomainError> {
        patch.validate()?;
        self.ensure_owner(caller, id)?;
        if let Some(category_id) = patch.category_id {
            self.ensure_category(category_id)?;
        }
        self.products
            .update(id, &patch)?
            .ok_or(DomainError::NotFound("Product"))
    }

    pub fn delete(&self, caller: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.ensure_owner(caller, id)?;
        if self.products.delete(id)? {
            Ok(())
        } else {
            Err(DomainError::NotFound("Product"))
        }
    }

    fn ensure_owner(&self, caller: Uuid, product_id: Uuid) -> Result<(), DomainError> {
        let product = self.get(product_id)?;
        let owned = self
            .stores
            .find(product.product.store_id)?
            .is_some_and(|store| store.user_id == caller);
        if !owned {
            return Err(DomainError::Forbidden(
                "only the owning store may change this product".to_string(),
            ));
        }
        Ok(())
    }

    fn ensure_category(&self, id: Uuid) -> Result<(), DomainError> {
        self.categories
            .find(id)?
            .map(|_| ())
            .ok_or(DomainError::NotFound("Category"))
    }
}
