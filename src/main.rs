use std::io;

use bookstore_orders::{build_server, build_service, create_pool, run_migrations, Config};
use dotenvy::dotenv;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let pool = create_pool(&config.database_url, config.pool_size).map_err(|e| {
        log::error!("failed to create database pool: {}", e);
        io::Error::other(e)
    })?;
    run_migrations(&pool).map_err(|e| {
        log::error!("failed to run database migrations: {}", e);
        io::Error::other(e)
    })?;

    log::info!("Starting server at http://{}", config.addr());

    build_server(build_service(pool), &config.host, config.port)?.await
}
