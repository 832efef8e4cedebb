use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::page::{ListResult, PageRequest};
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, ProductDetails, ProductFilter, ProductPatch};
use crate::schema::{product_photos, products};

use super::like_pattern;
use super::models::{
    NewProductPhotoRow, NewProductRow, ProductChangeset, ProductPhotoRow, ProductRow,
};

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn filtered(filter: &ProductFilter) -> products::BoxedQuery<'static, Pg> {
    let mut query = products::table.into_boxed();
    if let Some(name) = filter.name.as_deref().filter(|n| !n.trim().is_empty()) {
        query = query.filter(products::name.ilike(like_pattern(name)));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(products::category_id.eq(category_id));
    }
    if let Some(store_id) = filter.store_id {
        query = query.filter(products::store_id.eq(store_id));
    }
    if let Some(min) = filter.min_price {
        query = query.filter(products::consumer_price.ge(min));
    }
    if let Some(max) = filter.max_price {
        query = query.filter(products::consumer_price.le(max));
    }
    query
}

fn with_photos(
    conn: &mut PgConnection,
    rows: Vec<ProductRow>,
) -> Result<Vec<ProductDetails>, DomainError> {
    let photos = ProductPhotoRow::belonging_to(&rows)
        .select(ProductPhotoRow::as_select())
        .order(product_photos::created_at)
        .load(conn)?
        .grouped_by(&rows);

    Ok(rows
        .into_iter()
        .zip(photos)
        .map(|(product, photos)| ProductDetails {
            product: product.into(),
            photos: photos.into_iter().map(Into::into).collect(),
        })
        .collect())
}

fn insert_photos(
    conn: &mut PgConnection,
    product_id: Uuid,
    urls: &[String],
) -> Result<(), DomainError> {
    if urls.is_empty() {
        return Ok(());
    }
    let rows: Vec<NewProductPhotoRow> = urls
        .iter()
        .map(|url| NewProductPhotoRow {
            id: Uuid::new_v4(),
            product_id,
            url,
        })
        .collect();
    diesel::insert_into(product_photos::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

fn load_one(conn: &mut PgConnection, id: Uuid) -> Result<Option<ProductDetails>, DomainError> {
    let row = products::table
        .find(id)
        .select(ProductRow::as_select())
        .first(conn)
        .optional()?;
    match row {
        Some(row) => Ok(with_photos(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

impl ProductRepository for DieselProductRepository {
    fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<ListResult<ProductDetails>, DomainError> {
        let mut conn = self.pool.get()?;

        let total: i64 = filtered(filter).count().get_result(&mut conn)?;
        let rows = filtered(filter)
            .select(ProductRow::as_select())
            .order((products::created_at.desc(), products::id))
            .limit(page.limit)
            .offset(page.offset())
            .load(&mut conn)?;

        Ok(ListResult {
            items: with_photos(&mut conn, rows)?,
            total,
        })
    }

    fn find(&self, id: Uuid) -> Result<Option<ProductDetails>, DomainError> {
        let mut conn = self.pool.get()?;
        load_one(&mut conn, id)
    }

    fn create(&self, product: NewProduct) -> Result<ProductDetails, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::insert_into(products::table)
                .values(NewProductRow::from(&product))
                .returning(ProductRow::as_returning())
                .get_result(conn)?;
            insert_photos(conn, row.id, &product.photos)?;

            with_photos(conn, vec![row])?
                .pop()
                .ok_or_else(|| DomainError::Internal("inserted product vanished".to_string()))
        })
    }

    fn update(
        &self,
        id: Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<ProductDetails>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let updated = diesel::update(products::table.find(id))
                .set(ProductChangeset::from(patch))
                .execute(conn)?;
            if updated == 0 {
                return Ok(None);
            }

            if let Some(urls) = &patch.photos {
                diesel::delete(product_photos::table.filter(product_photos::product_id.eq(id)))
                    .execute(conn)?;
                insert_photos(conn, id, urls)?;
            }

            load_one(conn, id)
        })
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let affected = diesel::delete(products::table.find(id)).execute(&mut conn)?;
        Ok(affected > 0)
    }
}
