use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::product_service::ProductInput;
use crate::auth::AuthUser;
use crate::domain::page::PageResponse;
use crate::domain::product::{ProductDetails, ProductFilter, ProductPatch};
use crate::errors::AppError;
use crate::state::AppState;

use super::{blocking, PageParams};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
    pub category_id: Option<Uuid>,
    pub store_id: Option<Uuid>,
    /// Lower bound on the consumer price.
    pub min_price: Option<i64>,
    /// Upper bound on the consumer price.
    pub max_price: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub reseller_price: i64,
    pub consumer_price: i64,
    pub stock: i32,
    pub category_id: Uuid,
    /// Photo URLs.
    #[serde(default)]
    pub photos: Vec<String>,
}

/// A `photos` list replaces every existing photo.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ProductPatchRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub reseller_price: Option<i64>,
    pub consumer_price: Option<i64>,
    pub stock: Option<i32>,
    pub category_id: Option<Uuid>,
    pub photos: Option<Vec<String>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Paginated products", body = PageResponse<ProductDetails>),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("token" = [])),
    tag = "products"
)]
pub async fn list_products(
    state: web::Data<AppState>,
    _caller: AuthUser,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse, AppError> {
    let products = state.products.clone();
    let q = query.into_inner();
    let page = PageParams {
        page: q.page,
        limit: q.limit,
    }
    .page_request();
    let filter = ProductFilter {
        name: q.name,
        category_id: q.category_id,
        store_id: q.store_id,
        min_price: q.min_price,
        max_price: q.max_price,
    };
    let result = blocking(move || products.list(&filter, page)).await?;
    Ok(HttpResponse::Ok().json(PageResponse::new(result, page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Product found", body = ProductDetails),
        (status = 404, description = "Product not found"),
    ),
    security(("token" = [])),
    tag = "products"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    _caller: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let products = state.products.clone();
    let id = path.into_inner();
    let product = blocking(move || products.get(id)).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// POST /api/v1/products
///
/// Adds a product to the caller's store.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductDetails),
        (status = 400, description = "Invalid name, price or stock"),
        (status = 403, description = "Caller has no store"),
        (status = 404, description = "Category not found"),
    ),
    security(("token" = [])),
    tag = "products"
)]
pub async fn create_product(
    state: web::Data<AppState>,
    caller: AuthUser,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let products = state.products.clone();
    let body = body.into_inner();
    let input = ProductInput {
        name: body.name,
        description: body.description,
        reseller_price: body.reseller_price,
        consumer_price: body.consumer_price,
        stock: body.stock,
        category_id: body.category_id,
        photos: body.photos,
    };
    let product = blocking(move || products.create(caller.id, input)).await?;
    Ok(HttpResponse::Created().json(product))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    request_body = ProductPatchRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductDetails),
        (status = 403, description = "Caller does not own the product"),
        (status = 404, description = "Product or category not found"),
    ),
    security(("token" = [])),
    tag = "products"
)]
pub async fn update_product(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<ProductPatchRequest>,
) -> Result<HttpResponse, AppError> {
    let products = state.products.clone();
    let id = path.into_inner();
    let body = body.into_inner();
    let patch = ProductPatch {
        name: body.name,
        description: body.description,
        reseller_price: body.reseller_price,
        consumer_price: body.consumer_price,
        stock: body.stock,
        category_id: body.category_id,
        photos: body.photos,
    };
    let product = blocking(move || products.update(caller.id, id, patch)).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, description = "Caller does not own the product"),
        (status = 404, description = "Product not found"),
    ),
    security(("token" = [])),
    tag = "products"
)]
pub async fn delete_product(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let products = state.products.clone();
    let id = path.into_inner();
    blocking(move || products.delete(caller.id, id)).await?;
    Ok(HttpResponse::NoContent().finish())
}
