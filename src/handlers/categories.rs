use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain::category::Category;
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses((status = 200, description = "All categories", body = [Category])),
    tag = "categories"
)]
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = state.categories.clone();
    let list = blocking(move || categories.list()).await?;
    Ok(HttpResponse::Ok().json(list))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category UUID")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found"),
    ),
    tag = "categories"
)]
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let categories = state.categories.clone();
    let id = path.into_inner();
    let category = blocking(move || categories.get(id)).await?;
    Ok(HttpResponse::Ok().json(category))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 403, description = "Caller is not an admin"),
    ),
    security(("token" = [])),
    tag = "categories"
)]
pub async fn create_category(
    state: web::Data<AppState>,
    caller: AuthUser,
    body: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let categories = state.categories.clone();
    let name = body.into_inner().name;
    let category = blocking(move || categories.create(caller.id, &name)).await?;
    Ok(HttpResponse::Created().json(category))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category UUID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category renamed", body = Category),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Category not found"),
    ),
    security(("token" = [])),
    tag = "categories"
)]
pub async fn rename_category(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let categories = state.categories.clone();
    let id = path.into_inner();
    let name = body.into_inner().name;
    let category = blocking(move || categories.rename(caller.id, id, &name)).await?;
    Ok(HttpResponse::Ok().json(category))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category UUID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 403, description = "Caller is not an admin"),
        (status = 409, description = "Category still has products"),
    ),
    security(("token" = [])),
    tag = "categories"
)]
pub async fn delete_category(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let categories = state.categories.clone();
    let id = path.into_inner();
    blocking(move || categories.delete(caller.id, id)).await?;
    Ok(HttpResponse::NoContent().finish())
}
