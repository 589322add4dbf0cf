//! Offline seeding tool: `seed [COUNT]` inserts COUNT (default 500) fake
//! orders using the same configuration as the server.

use std::error::Error;

use dotenvy::dotenv;
use purchase_order_service::bootstrap;
use purchase_order_service::config::AppConfig;
use purchase_order_service::seed::{seed_orders, SEED_RECORD_COUNT};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let count = match std::env::args().nth(1) {
        Some(raw) => raw.parse()?,
        None => SEED_RECORD_COUNT,
    };

    let config = AppConfig::from_env()?;
    let state = bootstrap(&config).await?;

    let written = seed_orders(state.orders.as_ref(), count).await?;
    log::info!("Inserted {} fake orders into '{}'", written, config.database);

    Ok(())
}
