//! Order creation. Every step runs against one [`CheckoutTx`], so any error
//! returned from [`place_order`] leaves no trace once the caller rolls back.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::address::Address;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    invoice_code, line_total, order_total, LineItemView, NewLineItem, NewOrder, OrderItemInput,
    OrderRequest, OrderView, PriceSnapshot,
};
use crate::domain::ports::CheckoutTx;
use crate::domain::product::Product;

pub fn place_order(
    tx: &mut dyn CheckoutTx,
    user_id: Uuid,
    request: &OrderRequest,
) -> Result<OrderView, DomainError> {
    request.validate()?;

    let address = validate_address(tx, user_id, request.address_id)?;

    let order_id = Uuid::new_v4();
    tx.insert_order(&NewOrder {
        id: order_id,
        user_id,
        address_id: address.id,
        invoice_code: invoice_code(Utc::now()),
        payment_method: request.payment_method.clone(),
    })?;

    let mut written: Vec<Option<LineItemView>> = request.items.iter().map(|_| None).collect();
    for index in lock_order(&request.items) {
        let input = &request.items[index];
        let product = resolve_product(tx, input)?;
        let snapshot = tx.snapshot_for(&product)?;
        let item = write_line_item(tx, order_id, &product, snapshot, input.quantity)?;
        mutate_stock(tx, &product, input.quantity)?;
        written[index] = Some(item);
    }
    let items: Vec<LineItemView> = written.into_iter().flatten().collect();

    let total = order_total(items.iter().map(|i| i.item.line_total))?;
    let order = tx.finalize_order(order_id, total)?;

    Ok(OrderView::assemble(order, address, items))
}

/// Indices of `items` sorted by product id. Every checkout touches product
/// rows in this order, so two orders over the same products cannot deadlock.
/// The sort is stable: repeats of one product keep their request order.
fn lock_order(items: &[OrderItemInput]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&index| items[index].product_id);
    order
}

fn validate_address(
    tx: &mut dyn CheckoutTx,
    user_id: Uuid,
    address_id: Uuid,
) -> Result<Address, DomainError> {
    tx.find_address(user_id, address_id)?
        .ok_or(DomainError::NotFound("Address"))
}

fn resolve_product(
    tx: &mut dyn CheckoutTx,
    input: &OrderItemInput,
) -> Result<Product, DomainError> {
    let product = tx
        .find_product(input.product_id)?
        .ok_or(DomainError::NotFound("Product"))?;
    if product.stock < input.quantity {
        return Err(insufficient(product.id, input.quantity));
    }
    Ok(product)
}

fn write_line_item(
    tx: &mut dyn CheckoutTx,
    order_id: Uuid,
    product: &Product,
    snapshot: PriceSnapshot,
    quantity: i32,
) -> Result<LineItemView, DomainError> {
    let item = tx.insert_line_item(&NewLineItem {
        id: Uuid::new_v4(),
        order_id,
        price_snapshot_id: snapshot.id,
        store_id: product.store_id,
        quantity,
        line_total: line_total(product.consumer_price, quantity)?,
    })?;
    Ok(LineItemView {
        item,
        price_snapshot: snapshot,
    })
}

// The read in `resolve_product` may be stale by now; only the conditional
// decrement decides.
fn mutate_stock(
    tx: &mut dyn CheckoutTx,
    product: &Product,
    quantity: i32,
) -> Result<(), DomainError> {
    if tx.decrement_stock(product.id, quantity)? {
        Ok(())
    } else {
        Err(insufficient(product.id, quantity))
    }
}

fn insufficient(product_id: Uuid, requested: i32) -> DomainError {
    DomainError::InsufficientStock {
        product_id,
        requested,
    }
}
