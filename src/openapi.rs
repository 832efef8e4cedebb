use actix_web::HttpResponse;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::openapi::Components;
use utoipa::{Modify, OpenApi};

use crate::application::auth_service::LoginResult;
use crate::domain::address::Address;
use crate::domain::category::Category;
use crate::domain::order::{LineItem, LineItemView, OrderView, PriceSnapshot};
use crate::domain::product::{Product, ProductDetails, ProductPhoto};
use crate::domain::store::{Store, StoreDetails};
use crate::domain::user::User;
use crate::handlers::{addresses, auth, categories, orders, products, stores, users};

#[derive(OpenApi)]
#[openapi(
    info(title = "Storefront API", version = "0.1.0"),
    paths(
        auth::register,
        auth::login,
        users::get_profile,
        users::update_profile,
        addresses::list_addresses,
        addresses::get_address,
        addresses::create_address,
        addresses::update_address,
        addresses::delete_address,
        stores::list_stores,
        stores::my_store,
        stores::get_store,
        stores::update_store,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::rename_category,
        categories::delete_category,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        orders::create_order,
        orders::get_order,
        orders::list_orders,
    ),
    components(schemas(
        User,
        LoginResult,
        Address,
        Store,
        StoreDetails,
        Category,
        Product,
        ProductPhoto,
        ProductDetails,
        PriceSnapshot,
        LineItem,
        LineItemView,
        OrderView,
        auth::RegisterRequest,
        auth::LoginRequest,
        users::UpdateProfileRequest,
        addresses::AddressRequest,
        addresses::AddressPatchRequest,
        stores::StorePatchRequest,
        categories::CategoryRequest,
        products::CreateProductRequest,
        products::ProductPatchRequest,
        orders::CreateOrderRequest,
        orders::OrderItemRequest,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "user", description = "The caller's profile"),
        (name = "addresses", description = "The caller's shipping addresses"),
        (name = "stores", description = "Stores"),
        (name = "categories", description = "Product categories"),
        (name = "products", description = "Product catalogue"),
        (name = "transactions", description = "Orders"),
    )
)]
pub struct ApiDoc;

/// Registers the `token` header scheme referenced by protected paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::new);
        components.add_security_scheme(
            "token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("token"))),
        );
    }
}

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
