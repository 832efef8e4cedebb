use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain::page::PageResponse;
use crate::domain::store::{Store, StoreDetails, StoreFilter, StorePatch};
use crate::errors::AppError;
use crate::state::AppState;

use super::{blocking, PageParams};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StoreQuery {
    /// Case-insensitive substring of the store name.
    pub name: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct StorePatchRequest {
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/stores",
    params(StoreQuery),
    responses(
        (status = 200, description = "Paginated stores", body = PageResponse<Store>),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("token" = [])),
    tag = "stores"
)]
pub async fn list_stores(
    state: web::Data<AppState>,
    _caller: AuthUser,
    query: web::Query<StoreQuery>,
) -> Result<HttpResponse, AppError> {
    let stores = state.stores.clone();
    let query = query.into_inner();
    let page = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .page_request();
    let filter = StoreFilter { name: query.name };
    let result = blocking(move || stores.list(&filter, page)).await?;
    Ok(HttpResponse::Ok().json(PageResponse::new(result, page)))
}

/// GET /api/v1/stores/my
///
/// The caller's store with all of its products.
#[utoipa::path(
    get,
    path = "/api/v1/stores/my",
    responses(
        (status = 200, description = "The caller's store", body = StoreDetails),
        (status = 404, description = "Caller has no store"),
    ),
    security(("token" = [])),
    tag = "stores"
)]
pub async fn my_store(
    state: web::Data<AppState>,
    caller: AuthUser,
) -> Result<HttpResponse, AppError> {
    let stores = state.stores.clone();
    let details = blocking(move || stores.mine(caller.id)).await?;
    Ok(HttpResponse::Ok().json(details))
}

#[utoipa::path(
    get,
    path = "/api/v1/stores/{id}",
    params(("id" = Uuid, Path, description = "Store UUID")),
    responses(
        (status = 200, description = "Store found", body = Store),
        (status = 404, description = "Store not found"),
    ),
    security(("token" = [])),
    tag = "stores"
)]
pub async fn get_store(
    state: web::Data<AppState>,
    _caller: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let stores = state.stores.clone();
    let id = path.into_inner();
    let store = blocking(move || stores.get(id)).await?;
    Ok(HttpResponse::Ok().json(store))
}

#[utoipa::path(
    put,
    path = "/api/v1/stores/{id}",
    params(("id" = Uuid, Path, description = "Store UUID")),
    request_body = StorePatchRequest,
    responses(
        (status = 200, description = "Store updated", body = Store),
        (status = 403, description = "Caller does not own the store"),
        (status = 404, description = "Store not found"),
    ),
    security(("token" = [])),
    tag = "stores"
)]
pub async fn update_store(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<StorePatchRequest>,
) -> Result<HttpResponse, AppError> {
    let stores = state.stores.clone();
    let id = path.into_inner();
    let body = body.into_inner();
    let patch = StorePatch {
        name: body.name,
        photo_url: body.photo_url,
    };
    let store = blocking(move || stores.update(caller.id, id, patch)).await?;
    Ok(HttpResponse::Ok().json(store))
}
