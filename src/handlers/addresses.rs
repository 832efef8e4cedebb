use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::address_service::AddressInput;
use crate::auth::AuthUser;
use crate::domain::address::{Address, AddressPatch};
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddressRequest {
    pub title: String,
    pub recipient_name: String,
    pub phone: String,
    pub detail: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AddressPatchRequest {
    pub title: Option<String>,
    pub recipient_name: Option<String>,
    pub phone: Option<String>,
    pub detail: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddressQuery {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/user/addresses",
    params(AddressQuery),
    responses(
        (status = 200, description = "The caller's addresses", body = [Address]),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("token" = [])),
    tag = "addresses"
)]
pub async fn list_addresses(
    state: web::Data<AppState>,
    caller: AuthUser,
    query: web::Query<AddressQuery>,
) -> Result<HttpResponse, AppError> {
    let addresses = state.addresses.clone();
    let title = query.into_inner().title;
    let list = blocking(move || addresses.list(caller.id, title.as_deref())).await?;
    Ok(HttpResponse::Ok().json(list))
}

#[utoipa::path(
    get,
    path = "/api/v1/user/addresses/{id}",
    params(("id" = Uuid, Path, description = "Address UUID")),
    responses(
        (status = 200, description = "Address found", body = Address),
        (status = 404, description = "No such address for the caller"),
    ),
    security(("token" = [])),
    tag = "addresses"
)]
pub async fn get_address(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let addresses = state.addresses.clone();
    let id = path.into_inner();
    let address = blocking(move || addresses.get(caller.id, id)).await?;
    Ok(HttpResponse::Ok().json(address))
}

#[utoipa::path(
    post,
    path = "/api/v1/user/addresses",
    request_body = AddressRequest,
    responses(
        (status = 201, description = "Address created", body = Address),
        (status = 400, description = "Missing field"),
    ),
    security(("token" = [])),
    tag = "addresses"
)]
pub async fn create_address(
    state: web::Data<AppState>,
    caller: AuthUser,
    body: web::Json<AddressRequest>,
) -> Result<HttpResponse, AppError> {
    let addresses = state.addresses.clone();
    let AddressRequest {
        title,
        recipient_name,
        phone,
        detail,
    } = body.into_inner();
    let input = AddressInput {
        title,
        recipient_name,
        phone,
        detail,
    };
    let address = blocking(move || addresses.create(caller.id, input)).await?;
    Ok(HttpResponse::Created().json(address))
}

#[utoipa::path(
    put,
    path = "/api/v1/user/addresses/{id}",
    params(("id" = Uuid, Path, description = "Address UUID")),
    request_body = AddressPatchRequest,
    responses(
        (status = 200, description = "Address updated", body = Address),
        (status = 404, description = "No such address for the caller"),
    ),
    security(("token" = [])),
    tag = "addresses"
)]
pub async fn update_address(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<AddressPatchRequest>,
) -> Result<HttpResponse, AppError> {
    let addresses = state.addresses.clone();
    let id = path.into_inner();
    let body = body.into_inner();
    let patch = AddressPatch {
        title: body.title,
        recipient_name: body.recipient_name,
        phone: body.phone,
        detail: body.detail,
    };
    let address = blocking(move || addresses.update(caller.id, id, patch)).await?;
    Ok(HttpResponse::Ok().json(address))
}

#[utoipa::path(
    delete,
    path = "/api/v1/user/addresses/{id}",
    params(("id" = Uuid, Path, description = "Address UUID")),
    responses(
        (status = 204, description = "Address deleted"),
        (status = 404, description = "No such address for the caller"),
        (status = 409, description = "Address used by an order"),
    ),
    security(("token" = [])),
    tag = "addresses"
)]
pub async fn delete_address(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let addresses = state.addresses.clone();
    let id = path.into_inner();
    blocking(move || addresses.delete(caller.id, id)).await?;
    Ok(HttpResponse::NoContent().finish())
}
