use std::io;

use dotenvy::dotenv;
use storefront_service::auth::{PasswordHasher, TokenIssuer};
use storefront_service::{build_server, create_pool, run_migrations, AppConfig, AppState, Repositories};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let pool = create_pool(&config.database_url).map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    let state = AppState::new(
        Repositories::diesel(pool),
        TokenIssuer::new(&config.jwt_secret, config.jwt_ttl_hours),
        PasswordHasher::new(config.bcrypt_cost),
    );

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, &config.host, config.port)?.await
}
