use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::page::{ListResult, PageRequest};
use crate::domain::ports::StoreRepository;
use crate::domain::store::{Store, StoreFilter, StorePatch};
use crate::schema::stores;

use super::like_pattern;
use super::models::{StoreChangeset, StoreRow};

pub struct DieselStoreRepository {
    pool: DbPool,
}

impl DieselStoreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn filtered(filter: &StoreFilter) -> stores::BoxedQuery<'static, Pg> {
    let mut query = stores::table.into_boxed();
    if let Some(name) = filter.name.as_deref().filter(|n| !n.trim().is_empty()) {
        query = query.filter(stores::name.ilike(like_pattern(name)));
    }
    query
}

impl StoreRepository for DieselStoreRepository {
    fn list(
        &self,
        filter: &StoreFilter,
        page: PageRequest,
    ) -> Result<ListResult<Store>, DomainError> {
        let mut conn = self.pool.get()?;

        let total: i64 = filtered(filter).count().get_result(&mut conn)?;
        let rows = filtered(filter)
            .select(StoreRow::as_select())
            .order((stores::created_at.desc(), stores::id))
            .limit(page.limit)
            .offset(page.offset())
            .load(&mut conn)?;

        Ok(ListResult {
            items: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }

    fn find(&self, id: Uuid) -> Result<Option<Store>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = stores::table
            .find(id)
            .select(StoreRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn find_by_owner(&self, user_id: Uuid) -> Result<Option<Store>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = stores::table
            .filter(stores::user_id.eq(user_id))
            .select(StoreRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn update(&self, id: Uuid, patch: &StorePatch) -> Result<Option<Store>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::update(stores::table.find(id))
            .set(StoreChangeset::from(patch))
            .returning(StoreRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::DieselStoreRepository;
    use crate::domain::page::PageRequest;
    use crate::domain::ports::StoreRepository;
    use crate::domain::store::{StoreFilter, StorePatch};
    use crate::infrastructure::test_db::{seed_seller, setup_db};

    #[tokio::test]
    async fn list_filters_case_insensitively_and_pages() {
        let (_container, pool) = setup_db().await;
        for (name, phone) in [("Budi", "1"), ("Sari", "2"), ("Budiman", "3")] {
            seed_seller(&pool, name, phone);
        }
        let repo = DieselStoreRepository::new(pool);

        let filter = StoreFilter {
            name: Some("BUDI".to_string()),
        };
        let page1 = repo
            .list(&filter, PageRequest::new(Some(1), Some(1)))
            .expect("list failed");
        assert_eq!(page1.total, 2);
        assert_eq!(page1.items.len(), 1);

        let all = repo
            .list(&StoreFilter::default(), PageRequest::default())
            .expect("list failed");
        assert_eq!(all.total, 3);
    }

    #[tokio::test]
    async fn update_sets_photo() {
        let (_container, pool) = setup_db().await;
        let (_, store) = seed_seller(&pool, "Budi", "0811");
        let repo = DieselStoreRepository::new(pool);

        let updated = repo
            .update(
                store.id,
                &StorePatch {
                    name: None,
                    photo_url: Some("https://img.example.com/budi.png".to_string()),
                },
            )
            .expect("update failed")
            .expect("store exists");

        assert_eq!(updated.name, "Budi Store");
        assert_eq!(
            updated.photo_url.as_deref(),
            Some("https://img.example.com/budi.png")
        );
    }
}
