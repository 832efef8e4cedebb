use std::sync::Arc;

use uuid::Uuid;

use crate::domain::category::Category;
use crate::domain::errors::{require_non_empty, DomainError};
use crate::domain::ports::{CategoryRepository, UserRepository};

/// Reads are open to everyone; writes require an admin caller.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    users: Arc<dyn UserRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { categories, users }
    }

    pub fn list(&self) -> Result<Vec<Category>, DomainError> {
        self.categories.list()
    }

    pub fn get(&self, id: Uuid) -> Result<Category, DomainError> {
        self.categories
            .find(id)?
            .ok_or(DomainError::NotFound("Category"))
    }

    pub fn create(&self, caller: Uuid, name: &str) -> Result<Category, DomainError> {
        self.require_admin(caller)?;
        require_non_empty("name", name)?;
        self.categories.create(Uuid::new_v4(), name.trim())
    }

    pub fn rename(&self, caller: Uuid, id: Uuid, name: &str) -> Result<Category, DomainError> {
        self.require_admin(caller)?;
        require_non_empty("name", name)?;
        self.categories
            .rename(id, name.trim())?
            .ok_or(DomainError::NotFound("Category"))
    }

    pub fn delete(&self, caller: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.require_admin(caller)?;
        if self.categories.delete(id)? {
            Ok(())
        } else {
            Err(DomainError::NotFound("Category"))
        }
    }

    fn require_admin(&self, caller: Uuid) -> Result<(), DomainError> {
        match self.users.find_by_id(caller)? {
            Some(user) if user.is_admin => Ok(()),
            Some(_) => Err(DomainError::Forbidden("admin only".to_string())),
            None => Err(DomainError::Unauthorized("unknown user".to_string())),
        }
    }
}
