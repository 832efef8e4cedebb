use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{store_name_for, NewUser, User, UserPatch};
use crate::schema::{stores, users};

use super::models::{NewStoreRow, NewUserRow, UserChangeset, UserRow};

pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for DieselUserRepository {
    fn create_with_store(&self, user: NewUser) -> Result<User, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::insert_into(users::table)
                .values(NewUserRow::from(&user))
                .returning(UserRow::as_returning())
                .get_result(conn)?;

            diesel::insert_into(stores::table)
                .values(&NewStoreRow {
                    id: Uuid::new_v4(),
                    user_id: row.id,
                    name: user.store_name(),
                })
                .execute(conn)?;

            Ok(row.into())
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = users::table
            .filter(users::phone.eq(phone))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn find_by_phone_or_email(
        &self,
        phone: &str,
        email: &str,
    ) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = users::table
            .filter(users::phone.eq(phone).or(users::email.eq(email)))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn update(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::update(users::table.find(id))
                .set(UserChangeset::from(patch))
                .returning(UserRow::as_returning())
                .get_result(conn)
                .optional()?;

            if let (Some(_), Some(name)) = (&row, &patch.name) {
                diesel::update(stores::table.filter(stores::user_id.eq(id)))
                    .set((
                        stores::name.eq(store_name_for(name)),
                        stores::updated_at.eq(Utc::now()),
                    ))
                    .execute(conn)?;
            }

            Ok(row.map(Into::into))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::DieselUserRepository;
    use crate::domain::errors::DomainError;
    use crate::domain::ports::{StoreRepository, UserRepository};
    use crate::domain::user::UserPatch;
    use crate::infrastructure::store_repo::DieselStoreRepository;
    use crate::infrastructure::test_db::{new_user, setup_db};

    #[tokio::test]
    async fn registration_creates_named_store() {
        let (_container, pool) = setup_db().await;
        let repo = DieselUserRepository::new(pool.clone());

        let user = repo
            .create_with_store(new_user("Budi", "0811"))
            .expect("create failed");

        let store = DieselStoreRepository::new(pool)
            .find_by_owner(user.id)
            .expect("query failed")
            .expect("store should exist");
        assert_eq!(store.name, "Budi Store");
        assert_eq!(
            repo.find_by_phone("0811").expect("find failed").map(|u| u.id),
            Some(user.id)
        );
    }

    #[tokio::test]
    async fn duplicate_phone_is_conflict_and_leaves_no_store() {
        let (_container, pool) = setup_db().await;
        let repo = DieselUserRepository::new(pool.clone());
        repo.create_with_store(new_user("Budi", "0811"))
            .expect("create failed");

        let mut dup = new_user("Sari", "0811");
        dup.email = "sari@example.com".to_string();
        let err = repo.create_with_store(dup).unwrap_err();

        assert!(matches!(&err, DomainError::Conflict(m) if m == "phone number already registered"));
        let stores = DieselStoreRepository::new(pool)
            .list(&Default::default(), Default::default())
            .expect("list failed");
        assert_eq!(stores.total, 1);
    }

    #[tokio::test]
    async fn rename_propagates_to_store() {
        let (_container, pool) = setup_db().await;
        let repo = DieselUserRepository::new(pool.clone());
        let user = repo
            .create_with_store(new_user("Budi", "0811"))
            .expect("create failed");

        let updated = repo
            .update(
                user.id,
                &UserPatch {
                    name: Some("Budiman".to_string()),
                    ..Default::default()
                },
            )
            .expect("update failed")
            .expect("user exists");

        assert_eq!(updated.name, "Budiman");
        let store = DieselStoreRepository::new(pool)
            .find_by_owner(user.id)
            .expect("query failed")
            .expect("store should exist");
        assert_eq!(store.name, "Budiman Store");
    }

    #[tokio::test]
    async fn update_unknown_user_is_none() {
        let (_container, pool) = setup_db().await;
        let repo = DieselUserRepository::new(pool);

        let result = repo
            .update(uuid::Uuid::new_v4(), &UserPatch::default())
            .expect("update should not error");

        assert!(result.is_none());
    }
}
