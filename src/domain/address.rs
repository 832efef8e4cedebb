use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::{require_non_empty, DomainError};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Address {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub recipient_name: String,
    pub phone: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAddress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub recipient_name: String,
    pub phone: String,
    pub detail: String,
}

impl NewAddress {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("recipient_name", &self.recipient_name)?;
        require_non_empty("phone", &self.phone)?;
        require_non_empty("detail", &self.detail)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddressPatch {
    pub title: Option<String>,
    pub recipient_name: Option<String>,
    pub phone: Option<String>,
    pub detail: Option<String>,
}

impl AddressPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [
            ("title", &self.title),
            ("recipient_name", &self.recipient_name),
            ("phone", &self.phone),
            ("detail", &self.detail),
        ] {
            if let Some(value) = value {
                require_non_empty(field, value)?;
            }
        }
        Ok(())
    }

    pub fn apply(&self, address: &mut Address) {
        if let Some(v) = &self.title {
            address.title = v.clone();
        }
        if let Some(v) = &self.recipient_name {
            address.recipient_name = v.clone();
        }
        if let Some(v) = &self.phone {
            address.phone = v.clone();
        }
        if let Some(v) = &self.detail {
            address.detail = v.clone();
        }
    }
}
