use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::OrdersDataService;
use crate::errors::{AppError, ErrorEnvelope};
use crate::seed::{seed_orders, SEED_RECORD_COUNT};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeedResponse {
    pub message: String,
    pub count: usize,
}

/// POST /seedDB
///
/// Development only; not routed outside dev environments.
#[utoipa::path(
    post,
    path = "/seedDB",
    responses(
        (status = 200, description = "Fake orders inserted", body = SeedResponse),
        (status = 500, description = "Seeding stopped on a failed write", body = ErrorEnvelope),
    ),
    tag = "seed"
)]
pub async fn seed_db(orders: web::Data<dyn OrdersDataService>) -> Result<HttpResponse, AppError> {
    let count = seed_orders(orders.get_ref(), SEED_RECORD_COUNT)
        .await
        .map_err(|e| AppError::internal("Unable to insert data", e))?;

    Ok(HttpResponse::Ok().json(SeedResponse {
        message: "Successfully inserted fake data".to_string(),
        count,
    }))
}
