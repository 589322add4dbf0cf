use std::io;

use dotenvy::dotenv;
use purchase_order_service::config::AppConfig;
use purchase_order_service::{bootstrap, build_server};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env().map_err(io::Error::other)?;
    env_logger::init_from_env(
        env_logger::Env::default().default_filter_or(config.default_log_filter()),
    );
    log::info!("Environment: {}", config.environment);

    // Fatal if MongoDB does not answer within the connection timeout.
    let state = bootstrap(&config).await.map_err(io::Error::other)?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, &config.host, config.port)?.await
}
