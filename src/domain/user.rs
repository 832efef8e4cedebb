use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::{require_non_empty, DomainError};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    #[serde(skip)]
    pub password_hash: String,
    pub phone: String,
    pub email: String,
    pub birth_date: String,
    pub gender: String,
    pub about: String,
    pub job: String,
    pub province_id: String,
    pub city_id: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration data; the password is already hashed by the time this reaches a repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub password_hash: String,
    pub phone: String,
    pub email: String,
    pub birth_date: String,
    pub gender: String,
    pub about: String,
    pub job: String,
    pub province_id: String,
    pub city_id: String,
    pub is_admin: bool,
}

impl NewUser {
    pub fn store_name(&self) -> String {
        store_name_for(&self.name)
    }
}

pub fn store_name_for(user_name: &str) -> String {
    format!("{user_name} Store")
}

/// Profile changes. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub about: Option<String>,
    pub job: Option<String>,
    pub province_id: Option<String>,
    pub city_id: Option<String>,
    pub is_admin: Option<bool>,
}

impl UserPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [
            ("name", &self.name),
            ("phone", &self.phone),
            ("email", &self.email),
        ] {
            if let Some(value) = value {
                require_non_empty(field, value)?;
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == UserPatch::default()
    }

    /// Applies the patch to an in-memory copy of the user.
    pub fn apply(&self, user: &mut User) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }
        set(&mut user.name, &self.name);
        set(&mut user.password_hash, &self.password_hash);
        set(&mut user.phone, &self.phone);
        set(&mut user.email, &self.email);
        set(&mut user.birth_date, &self.birth_date);
        set(&mut user.gender, &self.gender);
        set(&mut user.about, &self.about);
        set(&mut user.job, &self.job);
        set(&mut user.province_id, &self.province_id);
        set(&mut user.city_id, &self.city_id);
        set(&mut user.is_admin, &self.is_admin);
    }
}
