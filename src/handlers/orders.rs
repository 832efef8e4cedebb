use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain::order::{OrderFilter, OrderItemInput, OrderRequest, OrderView};
use crate::domain::page::PageResponse;
use crate::errors::AppError;
use crate::state::AppState;

use super::{blocking, PageParams};

// ── Request DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub payment_method: String,
    pub address_id: Uuid,
    pub items: Vec<OrderItemRequest>,
}

impl From<CreateOrderRequest> for OrderRequest {
    fn from(r: CreateOrderRequest) -> Self {
        OrderRequest {
            payment_method: r.payment_method,
            address_id: r.address_id,
            items: r
                .items
                .into_iter()
                .map(|i| OrderItemInput {
                    product_id: i.product_id,
                    quantity: i.quantity,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderQuery {
    /// Substring of the invoice code.
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/v1/transactions
///
/// Places an order. The order row, its line items, any first-sale price
/// snapshots and the stock decrements are written in one database
/// transaction; a failing item leaves nothing behind.
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderView),
        (status = 400, description = "Invalid input or insufficient stock"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Address or product not found"),
        (status = 500, description = "Internal server error"),
    ),
    security(("token" = [])),
    tag = "transactions"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    caller: AuthUser,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let orders = state.orders.clone();
    let request: OrderRequest = body.into_inner().into();
    let order = blocking(move || orders.place_order(caller.id, request)).await?;
    Ok(HttpResponse::Created().json(order))
}

/// GET /api/v1/transactions/{id}
///
/// Returns the caller's order with its shipping address and line items.
#[utoipa::path(
    get,
    path = "/api/v1/transactions/{id}",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order found", body = OrderView),
        (status = 404, description = "Order not found"),
    ),
    security(("token" = [])),
    tag = "transactions"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let orders = state.orders.clone();
    let id = path.into_inner();
    let order = blocking(move || orders.get_order(caller.id, id)).await?;
    Ok(HttpResponse::Ok().json(order))
}

/// GET /api/v1/transactions
///
/// The caller's orders, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    params(OrderQuery),
    responses(
        (status = 200, description = "Paginated list of orders", body = PageResponse<OrderView>),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("token" = [])),
    tag = "transactions"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    caller: AuthUser,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse, AppError> {
    let orders = state.orders.clone();
    let q = query.into_inner();
    let page = PageParams {
        page: q.page,
        limit: q.limit,
    }
    .page_request();
    let filter = OrderFilter { search: q.search };
    let result = blocking(move || orders.list_orders(caller.id, &filter, page)).await?;
    Ok(HttpResponse::Ok().json(PageResponse::new(result, page)))
}
