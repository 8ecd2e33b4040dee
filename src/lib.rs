pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{error::InternalError, middleware::Logger, web, App, HttpResponse, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::order_service::OrderService;
pub use config::Config;
pub use db::{create_pool, DbPool};
pub use domain::ports::{BookInfoProvider, OrderRepository};
pub use infrastructure::book_repo::DieselBookInfoProvider;
pub use infrastructure::order_repo::DieselOrderRepository;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// The order service wired to PostgreSQL.
pub type PgOrderService = OrderService<DieselOrderRepository, DieselBookInfoProvider>;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::health::health,
    ),
    components(schemas(
        handlers::orders::OrderItemRequest,
        handlers::orders::OrderItemResponse,
        handlers::orders::OrderResponse,
    )),
    tags(
        (name = "orders", description = "Order placement and history"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

pub fn build_service(pool: DbPool) -> PgOrderService {
    OrderService::new(
        DieselOrderRepository::new(pool.clone()),
        DieselBookInfoProvider::new(pool),
    )
}

/// Registers the health and order routes for a service backed by `R` and `B`.
///
/// The `OrderService<R, B>` itself must be registered as app data.
pub fn configure<R: OrderRepository, B: BookInfoProvider>(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("Failed to read order items: {}", err);
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
        )
        .into()
    });

    cfg.route("/health", web::get().to(handlers::health::health))
        .service(
            web::scope("/customers/{customer_id}/orders")
                .app_data(json_config)
                .route("", web::post().to(handlers::orders::create_order::<R, B>))
                .route("", web::get().to(handlers::orders::list_orders::<R, B>)),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: PgOrderService,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(service);
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(configure::<DieselOrderRepository, DieselBookInfoProvider>)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
