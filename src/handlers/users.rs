use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::application::user_service::ProfileChanges;
use crate::auth::AuthUser;
use crate::domain::user::User;
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;

/// Profile fields to change; omitted fields stay as they are.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub about: Option<String>,
    pub job: Option<String>,
    pub province_id: Option<String>,
    pub city_id: Option<String>,
    pub is_admin: Option<bool>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(r: UpdateProfileRequest) -> Self {
        ProfileChanges {
            name: r.name,
            password: r.password,
            phone: r.phone,
            email: r.email,
            birth_date: r.birth_date,
            gender: r.gender,
            about: r.about,
            job: r.job,
            province_id: r.province_id,
            city_id: r.city_id,
            is_admin: r.is_admin,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/user",
    responses(
        (status = 200, description = "The caller's profile", body = User),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("token" = [])),
    tag = "user"
)]
pub async fn get_profile(
    state: web::Data<AppState>,
    caller: AuthUser,
) -> Result<HttpResponse, AppError> {
    let users = state.users.clone();
    let user = blocking(move || users.profile(caller.id)).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// PUT /api/v1/user
///
/// A name change renames the caller's store too.
#[utoipa::path(
    put,
    path = "/api/v1/user",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = User),
        (status = 400, description = "Invalid or unknown field"),
        (status = 401, description = "Missing or invalid token"),
        (status = 409, description = "Phone number or email taken"),
    ),
    security(("token" = [])),
    tag = "user"
)]
pub async fn update_profile(
    state: web::Data<AppState>,
    caller: AuthUser,
    body: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let users = state.users.clone();
    let changes = body.into_inner().into();
    let user = blocking(move || users.update_profile(caller.id, changes)).await?;
    Ok(HttpResponse::Ok().json(user))
}
