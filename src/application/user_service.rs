use std::sync::Arc;

use uuid::Uuid;

use crate::auth::PasswordHasher;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{User, UserPatch};

/// Profile changes as requested by the caller; `password` is plain text.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub password: Option<String>,
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

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    pub fn profile(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)?
            .ok_or(DomainError::NotFound("User"))
    }

    pub fn update_profile(
        &self,
        user_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<User, DomainError> {
        let current = self.profile(user_id)?;

        let password_hash = match changes.password.as_deref() {
            Some("") => return Err(DomainError::invalid("password must not be empty")),
            Some(plain) => Some(self.hasher.hash(plain)?),
            None => None,
        };
        let patch = UserPatch {
            name: changes.name,
            password_hash,
            phone: changes.phone,
            email: changes.email,
            birth_date: changes.birth_date,
            gender: changes.gender,
            about: changes.about,
            job: changes.job,
            province_id: changes.province_id,
            city_id: changes.city_id,
            // Only admins may grant or revoke admin rights.
            is_admin: changes.is_admin.filter(|_| current.is_admin),
        };
        patch.validate()?;
        if patch.is_empty() {
            return Ok(current);
        }

        self.users
            .update(user_id, &patch)?
            .ok_or(DomainError::NotFound("User"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::infrastructure::memory::MemoryStore;

    fn service() -> (Arc<MemoryStore>, UserService) {
        let store = Arc::new(MemoryStore::new());
        let users = UserService::new(store.clone(), PasswordHasher::new(4));
        (store, users)
    }

    #[test]
    fn rename_also_renames_store() {
        let (store, users) = service();
        let user = store.seed_user("Budi", "0811", false);
        store.seed_store(user.id);

        let updated = users
            .update_profile(
                user.id,
                ProfileChanges {
                    name: Some("Budiman".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Budiman");
        assert_eq!(store.store_of(user.id).unwrap().name, "Budiman Store");
    }

    #[test]
    fn non_admin_cannot_promote_self() {
        let (store, users) = service();
        let user = store.seed_user("Budi", "0811", false);

        let updated = users
            .update_profile(
                user.id,
                ProfileChanges {
                    is_admin: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!updated.is_admin);
    }

    #[test]
    fn admin_can_drop_own_admin_flag() {
        let (store, users) = service();
        let admin = store.seed_user("Admin", "0800", true);

        let updated = users
            .update_profile(
                admin.id,
                ProfileChanges {
                    is_admin: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!updated.is_admin);
    }

    #[test]
    fn new_password_is_hashed() {
        let (store, users) = service();
        let user = store.seed_user("Budi", "0811", false);

        let updated = users
            .update_profile(
                user.id,
                ProfileChanges {
                    password: Some("baru12345".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_ne!(updated.password_hash, "baru12345");
        assert!(PasswordHasher::new(4).verify("baru12345", &updated.password_hash));
    }

    #[test]
    fn unknown_user_is_not_found() {
        let (_, users) = service();
        assert!(matches!(
            users.profile(Uuid::new_v4()),
            Err(DomainError::NotFound("User"))
        ));
    }
}
