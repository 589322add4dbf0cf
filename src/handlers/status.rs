use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::ServiceInfo;
use crate::domain::ports::DatabasePing;
use crate::util::format_iso;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    Down,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: ServiceStatus,
    pub service_name: String,
    pub up_time: String,
    pub environment: String,
    pub version: String,
}

/// GET /status
///
/// Service metadata plus whether the database answers a ping.
#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Service and database are up", body = StatusResponse),
        (status = 424, description = "Database unreachable", body = StatusResponse),
    ),
    tag = "status"
)]
pub async fn check_status(
    db: web::Data<dyn DatabasePing>,
    info: web::Data<ServiceInfo>,
) -> HttpResponse {
    log::debug!("in check_status");

    let (status, code) = match db.ping().await {
        Ok(()) => (ServiceStatus::Ok, StatusCode::OK),
        Err(_) => (ServiceStatus::Down, StatusCode::FAILED_DEPENDENCY),
    };

    HttpResponse::build(code).json(StatusResponse {
        status,
        service_name: info.name.clone(),
        up_time: format_iso(info.up_time),
        environment: info.environment.clone(),
        version: info.version.clone(),
    })
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = String, content_type = "text/plain"),
        (status = 503, description = "Something is wrong", body = String, content_type = "text/plain"),
    ),
    tag = "status"
)]
pub async fn health(db: web::Data<dyn DatabasePing>) -> HttpResponse {
    match db.ping().await {
        Ok(()) => HttpResponse::Ok().content_type("text/plain").body("OK"),
        Err(_) => HttpResponse::ServiceUnavailable()
            .content_type("text/plain")
            .body("Something is wrong"),
    }
}
