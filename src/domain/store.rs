use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::{require_non_empty, DomainError};
use super::product::ProductDetails;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Store {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoreDetails {
    #[serde(flatten)]
    pub store: Store,
    pub products: Vec<ProductDetails>,
}

#[derive(Debug, Clone, Default)]
pub struct StoreFilter {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StorePatch {
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

impl StorePatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        Ok(())
    }

    pub fn apply(&self, store: &mut Store) {
        if let Some(name) = &self.name {
            store.name = name.clone();
        }
        if let Some(url) = &self.photo_url {
            store.photo_url = Some(url.clone());
        }
    }
}
