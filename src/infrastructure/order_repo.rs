use std::collections::HashMap;

use chrono::Utc;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use uuid::Uuid;

use crate::application::checkout;
use crate::db::DbPool;
use crate::domain::address::Address;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    LineItem, LineItemView, NewLineItem, NewOrder, NewPriceSnapshot, Order, OrderFilter,
    OrderRequest, OrderView, PriceSnapshot,
};
use crate::domain::page::{ListResult, PageRequest};
use crate::domain::ports::{CheckoutTx, OrderRepository};
use crate::domain::product::Product;
use crate::schema::{addresses, order_items, orders, price_snapshots, products};

use super::like_pattern;
use super::models::{
    AddressRow, NewOrderItemRow, NewOrderRow, NewPriceSnapshotRow, OrderItemRow, OrderRow,
    PriceSnapshotRow, ProductRow,
};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Checkout steps bound to one open Postgres transaction.
struct DieselCheckoutTx<'a> {
    conn: &'a mut PgConnection,
}

impl DieselCheckoutTx<'_> {
    fn existing_snapshot(&mut self, product_id: Uuid) -> Result<Option<PriceSnapshot>, DomainError> {
        let row = price_snapshots::table
            .filter(price_snapshots::product_id.eq(product_id))
            .select(PriceSnapshotRow::as_select())
            .first(self.conn)
            .optional()?;
        Ok(row.map(Into::into))
    }
}

impl CheckoutTx for DieselCheckoutTx<'_> {
    fn find_address(&mut self, user_id: Uuid, id: Uuid) -> Result<Option<Address>, DomainError> {
        let row = addresses::table
            .filter(addresses::id.eq(id))
            .filter(addresses::user_id.eq(user_id))
            .select(AddressRow::as_select())
            .first(self.conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn find_product(&mut self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(self.conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn snapshot_for(&mut self, product: &Product) -> Result<PriceSnapshot, DomainError> {
        if let Some(existing) = self.existing_snapshot(product.id)? {
            return Ok(existing);
        }

        // A concurrent first sale may win the insert; either way the row that
        // ends up stored is the one every order references.
        let fresh = NewPriceSnapshot::of(product);
        diesel::insert_into(price_snapshots::table)
            .values(NewPriceSnapshotRow::from(&fresh))
            .on_conflict(price_snapshots::product_id)
            .do_nothing()
            .execute(self.conn)?;

        self.existing_snapshot(product.id)?.ok_or_else(|| {
            DomainError::Internal(format!("price snapshot for {} missing", product.id))
        })
    }

    fn decrement_stock(&mut self, product_id: Uuid, quantity: i32) -> Result<bool, DomainError> {
        let target = products::table
            .filter(products::id.eq(product_id))
            .filter(products::stock.ge(quantity));
        let affected = diesel::update(target)
            .set((
                products::stock.eq(products::stock - quantity),
                products::updated_at.eq(Utc::now()),
            ))
            .execute(self.conn)?;
        Ok(affected == 1)
    }

    fn insert_order(&mut self, order: &NewOrder) -> Result<(), DomainError> {
        diesel::insert_into(orders::table)
            .values(NewOrderRow::from(order))
            .execute(self.conn)?;
        Ok(())
    }

    fn insert_line_item(&mut self, item: &NewLineItem) -> Result<LineItem, DomainError> {
        let row = diesel::insert_into(order_items::table)
            .values(NewOrderItemRow::from(item))
            .returning(OrderItemRow::as_returning())
            .get_result(self.conn)?;
        Ok(row.into())
    }

    fn finalize_order(&mut self, order_id: Uuid, total_price: i64) -> Result<Order, DomainError> {
        let row = diesel::update(orders::table.find(order_id))
            .set((
                orders::total_price.eq(total_price),
                orders::updated_at.eq(Utc::now()),
            ))
            .returning(OrderRow::as_returning())
            .get_result(self.conn)?;
        Ok(row.into())
    }
}

fn for_user(user_id: Uuid, filter: &OrderFilter) -> orders::BoxedQuery<'static, Pg> {
    let mut query = orders::table
        .filter(orders::user_id.eq(user_id))
        .into_boxed();
    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.filter(orders::invoice_code.ilike(like_pattern(search)));
    }
    query
}

/// Attaches shipping addresses and snapshot-backed line items to `rows`.
fn load_views(conn: &mut PgConnection, rows: Vec<OrderRow>) -> Result<Vec<OrderView>, DomainError> {
    let address_ids: Vec<Uuid> = rows.iter().map(|o| o.address_id).collect();
    let shipping: HashMap<Uuid, Address> = addresses::table
        .filter(addresses::id.eq_any(address_ids))
        .select(AddressRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|r| (r.id, r.into()))
        .collect();

    let items: Vec<(OrderItemRow, PriceSnapshotRow)> = OrderItemRow::belonging_to(&rows)
        .inner_join(price_snapshots::table)
        .select((OrderItemRow::as_select(), PriceSnapshotRow::as_select()))
        .order((order_items::created_at, order_items::id))
        .load(conn)?;
    let grouped = items.grouped_by(&rows);

    rows.into_iter()
        .zip(grouped)
        .map(|(order, items)| {
            let address = shipping
                .get(&order.address_id)
                .cloned()
                .ok_or_else(|| {
                    DomainError::Internal(format!("address for order {} missing", order.id))
                })?;
            let items = items
                .into_iter()
                .map(|(item, snapshot)| LineItemView {
                    item: item.into(),
                    price_snapshot: snapshot.into(),
                })
                .collect();
            Ok(OrderView::assemble(order.into(), address, items))
        })
        .collect()
}

impl OrderRepository for DieselOrderRepository {
    fn place(&self, user_id: Uuid, request: &OrderRequest) -> Result<OrderView, DomainError> {
        let mut pooled = self.pool.get()?;
        let conn: &mut PgConnection = &mut pooled;

        conn.transaction::<_, DomainError, _>(|conn| {
            let mut tx = DieselCheckoutTx { conn };
            checkout::place_order(&mut tx, user_id, request)
        })
    }

    fn find_for_user(&self, user_id: Uuid, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut pooled = self.pool.get()?;
        let conn: &mut PgConnection = &mut pooled;

        let row = orders::table
            .filter(orders::id.eq(id))
            .filter(orders::user_id.eq(user_id))
            .select(OrderRow::as_select())
            .first(conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(load_views(conn, vec![row])?.pop())
    }

    fn list_for_user(
        &self,
        user_id: Uuid,
        filter: &OrderFilter,
        page: PageRequest,
    ) -> Result<ListResult<OrderView>, DomainError> {
        let mut pooled = self.pool.get()?;
        let conn: &mut PgConnection = &mut pooled;

        let total: i64 = for_user(user_id, filter).count().get_result(conn)?;
        let rows = for_user(user_id, filter)
            .select(OrderRow::as_select())
            .order((orders::created_at.desc(), orders::id))
            .limit(page.limit)
            .offset(page.offset())
            .load(conn)?;

        Ok(ListResult {
            items: load_views(conn, rows)?,
            total,
        })
    }
}
