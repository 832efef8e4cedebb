use std::sync::Arc;

use log::info;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{PasswordHasher, TokenIssuer};
use crate::domain::errors::{require_non_empty, DomainError};
use crate::domain::ports::UserRepository;
use crate::domain::user::{NewUser, User};

#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub password: String,
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

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Creates the user and their store.
    pub fn register(&self, reg: Registration) -> Result<User, DomainError> {
        require_non_empty("name", &reg.name)?;
        require_non_empty("password", &reg.password)?;
        require_non_empty("phone", &reg.phone)?;
        require_non_empty("email", &reg.email)?;

        if let Some(existing) = self.users.find_by_phone_or_email(&reg.phone, &reg.email)? {
            let msg = if existing.phone == reg.phone {
                "Phone number already exists"
            } else {
                "Email already exists"
            };
            return Err(DomainError::Conflict(msg.to_string()));
        }

        let user = self.users.create_with_store(NewUser {
            id: Uuid::new_v4(),
            name: reg.name,
            password_hash: self.hasher.hash(&reg.password)?,
            phone: reg.phone,
            email: reg.email,
            birth_date: reg.birth_date,
            gender: reg.gender,
            about: reg.about,
            job: reg.job,
            province_id: reg.province_id,
            city_id: reg.city_id,
            is_admin: reg.is_admin,
        })?;
        info!("registered user {}", user.id);
        Ok(user)
    }

    pub fn login(&self, phone: &str, password: &str) -> Result<LoginResult, DomainError> {
        let rejected = || DomainError::Unauthorized("invalid phone number or password".to_string());

        let user = self.users.find_by_phone(phone)?.ok_or_else(rejected)?;
        if !self.hasher.verify(password, &user.password_hash) {
            return Err(rejected());
        }
        let token = self.tokens.issue(user.id, &user.email)?;
        Ok(LoginResult { user, token })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::infrastructure::memory::MemoryStore;

    fn service() -> (Arc<MemoryStore>, AuthService) {
        let store = Arc::new(MemoryStore::new());
        let auth = AuthService::new(
            store.clone(),
            PasswordHasher::new(4),
            TokenIssuer::new("test-secret", 24),
        );
        (store, auth)
    }

    fn registration(phone: &str, email: &str) -> Registration {
        Registration {
            name: "Budi".to_string(),
            password: "rahasia123".to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn register_creates_user_and_store() {
        let (store, auth) = service();
        let user = auth.register(registration("0811", "budi@example.com")).unwrap();

        assert_ne!(user.password_hash, "rahasia123");
        let shop = store.store_of(user.id).expect("store created with user");
        assert_eq!(shop.name, "Budi Store");
    }

    #[test]
    fn duplicate_phone_and_email_are_reported() {
        let (_, auth) = service();
        auth.register(registration("0811", "budi@example.com")).unwrap();

        let err = auth.register(registration("0811", "other@example.com")).unwrap_err();
        assert_eq!(err.to_string(), "Conflict: Phone number already exists");

        let err = auth.register(registration("0899", "budi@example.com")).unwrap_err();
        assert_eq!(err.to_string(), "Conflict: Email already exists");
    }

    #[test]
    fn register_requires_password() {
        let (_, auth) = service();
        let mut reg = registration("0811", "budi@example.com");
        reg.password.clear();
        assert!(matches!(auth.register(reg), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn login_issues_a_token_for_the_user() {
        let (_, auth) = service();
        let user = auth.register(registration("0811", "budi@example.com")).unwrap();

        let result = auth.login("0811", "rahasia123").unwrap();
        assert_eq!(result.user.id, user.id);
        let claims = TokenIssuer::new("test-secret", 24).verify(&result.token).unwrap();
        assert_eq!(claims.user_id, user.id);
    }

    #[test]
    fn login_rejects_bad_credentials_alike() {
        let (_, auth) = service();
        auth.register(registration("0811", "budi@example.com")).unwrap();

        let wrong_password = auth.login("0811", "nope").unwrap_err();
        let unknown_phone = auth.login("0000", "rahasia123").unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_phone.to_string());
        assert!(matches!(wrong_password, DomainError::Unauthorized(_)));
    }
}
