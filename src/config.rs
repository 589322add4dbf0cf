use std::env;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::util::is_dev_mode;

pub const DEFAULT_DATABASE: &str = "purchase-orders";
pub const DEFAULT_SERVICE_NAME: &str = "purchase-order-service";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Process settings, read once from the environment (and `.env`) at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub database: String,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub service_name: String,
    pub upsert_on_update: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let mongodb_uri = lookup("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?;

        let port_raw = get_or("PORT", "8080");
        let port = port_raw.parse().map_err(|_| ConfigError::Invalid {
            name: "PORT",
            value: port_raw.clone(),
        })?;

        let upsert_raw = get_or("ORDERS_UPSERT_ON_UPDATE", "false");
        let upsert_on_update = match upsert_raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => {
                return Err(ConfigError::Invalid {
                    name: "ORDERS_UPSERT_ON_UPDATE",
                    value: upsert_raw,
                })
            }
        };

        Ok(Self {
            mongodb_uri,
            database: get_or("MONGODB_DATABASE", DEFAULT_DATABASE),
            host: get_or("HOST", "0.0.0.0"),
            port,
            environment: get_or("APP_ENV", "dev"),
            service_name: get_or("SERVICE_NAME", DEFAULT_SERVICE_NAME),
            upsert_on_update,
        })
    }

    pub fn is_dev_mode(&self) -> bool {
        is_dev_mode(&self.environment)
    }

    pub fn default_log_filter(&self) -> &'static str {
        if self.is_dev_mode() {
            "debug"
        } else {
            "info"
        }
    }

    pub fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            name: self.service_name.clone(),
            up_time: Utc::now(),
            environment: self.environment.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Metadata reported by the status endpoint.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub name: String,
    pub up_time: DateTime<Utc>,
    pub environment: String,
    pub version: String,
}
