use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::application::auth_service::{LoginResult, Registration};
use crate::domain::user::User;
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub password: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub province_id: String,
    #[serde(default)]
    pub city_id: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl From<RegisterRequest> for Registration {
    fn from(r: RegisterRequest) -> Self {
        Registration {
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

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

/// POST /api/v1/auth/register
///
/// Creates the account and its store.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Missing required field"),
        (status = 409, description = "Phone number or email already registered"),
    ),
    tag = "auth"
)]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let auth = state.auth.clone();
    let registration = body.into_inner().into();
    let user = blocking(move || auth.register(registration)).await?;
    Ok(HttpResponse::Created().json(user))
}

/// POST /api/v1/auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResult),
        (status = 401, description = "Wrong phone number or password"),
    ),
    tag = "auth"
)]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let auth = state.auth.clone();
    let LoginRequest { phone, password } = body.into_inner();
    let result = blocking(move || auth.login(&phone, &password)).await?;
    Ok(HttpResponse::Ok().json(result))
}
