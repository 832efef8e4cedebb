use std::sync::Arc;

use uuid::Uuid;

use crate::domain::address::{Address, AddressPatch, NewAddress};
use crate::domain::errors::DomainError;
use crate::domain::ports::AddressRepository;

#[derive(Debug, Clone)]
pub struct AddressInput {
    pub title: String,
    pub recipient_name: String,
    pub phone: String,
    pub detail: String,
}

#[derive(Clone)]
pub struct AddressService {
    repo: Arc<dyn AddressRepository>,
}

impl AddressService {
    pub fn new(repo: Arc<dyn AddressRepository>) -> Self {
        Self { repo }
    }

    pub fn list(&self, user_id: Uuid, title: Option<&str>) -> Result<Vec<Address>, DomainError> {
        self.repo.list(user_id, title.filter(|t| !t.is_empty()))
    }

    pub fn get(&self, user_id: Uuid, id: Uuid) -> Result<Address, DomainError> {
        self.repo
            .find(user_id, id)?
            .ok_or(DomainError::NotFound("Address"))
    }

    pub fn create(&self, user_id: Uuid, input: AddressInput) -> Result<Address, DomainError> {
        let address = NewAddress {
            id: Uuid::new_v4(),
            user_id,
            title: input.title,
            recipient_name: input.recipient_name,
            phone: input.phone,
            detail: input.detail,
        };
        address.validate()?;
        self.repo.create(address)
    }

    pub fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: AddressPatch,
    ) -> Result<Address, DomainError> {
        patch.validate()?;
        self.repo
            .update(user_id, id, &patch)?
            .ok_or(DomainError::NotFound("Address"))
    }

    pub fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        if self.repo.delete(user_id, id)? {
            Ok(())
        } else {
            Err(DomainError::NotFound("Address"))
        }
    }
}
