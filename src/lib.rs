pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod seed;
pub mod util;

use std::sync::Arc;

use actix_web::error::JsonPayloadError;
use actix_web::{middleware::Logger, web, App, HttpRequest, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::order_service::OrdersService;
use config::{AppConfig, ServiceInfo};
use domain::errors::DomainError;
use domain::ports::{DatabasePing, OrdersDataService};
use errors::AppError;
use infrastructure::order_repo::MongoOrderCollection;

pub use db::DbManager;

/// Everything request handlers share. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrdersDataService>,
    pub db: Arc<dyn DatabasePing>,
    pub service_info: ServiceInfo,
}

/// Connects to MongoDB and wires the orders data service on top of it.
pub async fn bootstrap(config: &AppConfig) -> Result<AppState, DomainError> {
    let manager = DbManager::connect(&config.mongodb_uri, &config.database).await?;
    let orders = OrdersService::new(MongoOrderCollection::new(manager.database()))
        .with_upsert_on_update(config.upsert_on_update);

    Ok(AppState {
        orders: Arc::new(orders),
        db: Arc::new(manager),
        service_info: config.service_info(),
    })
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Purchase Order Service",
        description = "CRUD over purchase orders stored in MongoDB"
    ),
    paths(
        handlers::orders::post_order,
        handlers::orders::put_order,
        handlers::orders::get_orders,
        handlers::orders::get_order,
        handlers::orders::delete_order,
        handlers::status::check_status,
        handlers::status::health,
        handlers::seed::seed_db,
    ),
    components(schemas(
        domain::order::Order,
        domain::order::Product,
        handlers::orders::CreatedOrder,
        handlers::status::StatusResponse,
        handlers::status::ServiceStatus,
        handlers::seed::SeedResponse,
        errors::ErrorEnvelope,
    )),
    tags(
        (name = "orders", description = "Purchase orders"),
        (name = "status", description = "Liveness and dependency checks"),
        (name = "seed", description = "Development data"),
    )
)]
pub struct ApiDoc;

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request("Invalid request body", err).into()
}

/// Registers routes and shared data. `/seedDB` exists only in dev
/// environments.
pub fn configure(cfg: &mut web::ServiceConfig, state: AppState) {
    use handlers::{orders, seed, status};

    let dev_mode = util::is_dev_mode(&state.service_info.environment);

    cfg.app_data(web::Data::from(state.orders))
        .app_data(web::Data::from(state.db))
        .app_data(web::Data::new(state.service_info))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/status", web::get().to(status::check_status))
        .route("/health", web::get().to(status::health))
        .service(
            web::scope("/orders")
                .route("", web::get().to(orders::get_orders))
                .route("", web::post().to(orders::post_order))
                .route("", web::put().to(orders::put_order))
                // `.*` so that `/orders/` reaches the handler with an empty id.
                .route("/{id:.*}", web::get().to(orders::get_order))
                .route("/{id:.*}", web::delete().to(orders::delete_order)),
        )
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

    if dev_mode {
        cfg.route("/seedDB", web::post().to(seed::seed_db));
    }
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| configure(cfg, state))
    })
    .bind((host.to_string(), port))?
    .run())
}
