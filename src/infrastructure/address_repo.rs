use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::address::{Address, AddressPatch, NewAddress};
use crate::domain::errors::DomainError;
use crate::domain::ports::AddressRepository;
use crate::schema::addresses;

use super::like_pattern;
use super::models::{AddressChangeset, AddressRow, NewAddressRow};

pub struct DieselAddressRepository {
    pool: DbPool,
}

impl DieselAddressRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl AddressRepository for DieselAddressRepository {
    fn list(&self, user_id: Uuid, title: Option<&str>) -> Result<Vec<Address>, DomainError> {
        let mut conn = self.pool.get()?;
        let mut query = addresses::table
            .filter(addresses::user_id.eq(user_id))
            .into_boxed();
        if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
            query = query.filter(addresses::title.ilike(like_pattern(title)));
        }
        let rows = query
            .select(AddressRow::as_select())
            .order(addresses::created_at)
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<Address>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = addresses::table
            .filter(addresses::id.eq(id))
            .filter(addresses::user_id.eq(user_id))
            .select(AddressRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn create(&self, address: NewAddress) -> Result<Address, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(addresses::table)
            .values(NewAddressRow::from(&address))
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: &AddressPatch,
    ) -> Result<Option<Address>, DomainError> {
        let mut conn = self.pool.get()?;
        let target = addresses::table
            .filter(addresses::id.eq(id))
            .filter(addresses::user_id.eq(user_id));
        let row = diesel::update(target)
            .set(AddressChangeset::from(patch))
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    /// Fails with `Conflict` once an order ships to the address.
    fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let target = addresses::table
            .filter(addresses::id.eq(id))
            .filter(addresses::user_id.eq(user_id));
        let affected = diesel::delete(target).execute(&mut conn)?;
        Ok(affected > 0)
    }
}
