use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::order::Order;
use crate::domain::ports::OrdersDataService;
use crate::errors::{AppError, ErrorEnvelope};

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedOrder {
    /// 24-character hex id assigned by the store.
    pub order_id: String,
}

fn require_id(id: &str) -> Result<&str, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::bad_request("bad request", "order id is required"));
    }
    Ok(id)
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Creates the order when `order_id` is unset, otherwise updates the order
/// with that id. Failed creates and updates that matched nothing are both
/// reported as 500.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = Order,
    responses(
        (status = 200, description = "Created (id) or updated (affected count)", body = CreatedOrder),
        (status = 400, description = "Malformed request body", body = ErrorEnvelope),
        (status = 500, description = "Order could not be written", body = ErrorEnvelope),
    ),
    tag = "orders"
)]
pub async fn post_order(
    orders: web::Data<dyn OrdersDataService>,
    body: web::Json<Order>,
) -> Result<HttpResponse, AppError> {
    let order = body.into_inner();

    if order.assigned_id().is_none() {
        return match orders.create(order).await {
            Ok(id) => Ok(HttpResponse::Ok().json(CreatedOrder {
                order_id: id.to_string(),
            })),
            Err(e) => Err(AppError::internal("Unexpected Error occurred", e)),
        };
    }

    match orders.update(order).await {
        Ok(count) if count != 0 => Ok(HttpResponse::Ok().json(count)),
        Ok(_) => Err(AppError::internal(
            "Unexpected Error occurred",
            "no order matched the given order_id",
        )),
        Err(e) => Err(AppError::internal("Unexpected Error occurred", e)),
    }
}

/// PUT /orders
///
/// Same contract as POST; both verbs create or update depending on `order_id`.
#[utoipa::path(
    put,
    path = "/orders",
    request_body = Order,
    responses(
        (status = 200, description = "Created (id) or updated (affected count)", body = CreatedOrder),
        (status = 400, description = "Malformed request body", body = ErrorEnvelope),
        (status = 500, description = "Order could not be written", body = ErrorEnvelope),
    ),
    tag = "orders"
)]
pub async fn put_order(
    orders: web::Data<dyn OrdersDataService>,
    body: web::Json<Order>,
) -> Result<HttpResponse, AppError> {
    post_order(orders, body).await
}

/// GET /orders
///
/// Returns at most one page (100) of orders in storage order.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Orders", body = Vec<Order>),
        (status = 500, description = "Orders could not be read", body = ErrorEnvelope),
    ),
    tag = "orders"
)]
pub async fn get_orders(
    orders: web::Data<dyn OrdersDataService>,
) -> Result<HttpResponse, AppError> {
    let result = orders.get_all().await.map_err(|e| {
        AppError::internal("Error occurred while retrieving purchase orders", e)
    })?;

    Ok(HttpResponse::Ok().json(result))
}

/// GET /orders/{id}
///
/// An unknown id is not an error: the body is `null`. A malformed id is a
/// 400, any other failure a 500.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order id (24 hex chars)"),
    ),
    responses(
        (status = 200, description = "The order, or null when absent", body = Order),
        (status = 400, description = "Empty or malformed id", body = ErrorEnvelope),
        (status = 500, description = "Lookup failed", body = ErrorEnvelope),
    ),
    tag = "orders"
)]
pub async fn get_order(
    orders: web::Data<dyn OrdersDataService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = require_id(&path)?;

    let order = orders
        .get_by_id(id)
        .await
        .map_err(|e| AppError::from_domain("Error to retrieve order details", e))?;

    Ok(HttpResponse::Ok().json(order))
}

/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order id (24 hex chars)"),
    ),
    responses(
        (status = 200, description = "Number of deleted orders (0 or 1)", body = u64),
        (status = 400, description = "Empty or malformed id", body = ErrorEnvelope),
        (status = 500, description = "Delete failed", body = ErrorEnvelope),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    orders: web::Data<dyn OrdersDataService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = require_id(&path)?;

    let count = orders
        .delete_by_id(id)
        .await
        .map_err(|e| AppError::from_domain("Error to delete order", e))?;

    Ok(HttpResponse::Ok().json(count))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::application::order_service::OrdersService;
    use crate::domain::errors::DomainError;
    use crate::domain::order::OrderId;
    use crate::domain::ports::DatabasePing;
    use crate::infrastructure::memory::InMemoryOrderCollection;
    use crate::{configure, AppState};

    use super::*;

    struct AlwaysUp;

    #[async_trait]
    impl DatabasePing for AlwaysUp {
        async fn ping(&self) -> Result<(), DomainError> {
            Ok(())
        }
    }

    /// Counts calls and fails every one of them.
    #[derive(Default)]
    struct RecordingService {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OrdersDataService for RecordingService {
        async fn create(&self, _: Order) -> Result<OrderId, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::Storage("unreachable".to_string()))
        }
        async fn update(&self, _: Order) -> Result<u64, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::Storage("unreachable".to_string()))
        }
        async fn get_all(&self) -> Result<Vec<Order>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::Storage("unreachable".to_string()))
        }
        async fn get_by_id(&self, _: &str) -> Result<Option<Order>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::Storage("unreachable".to_string()))
        }
        async fn delete_by_id(&self, _: &str) -> Result<u64, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::Storage("unreachable".to_string()))
        }
    }

    fn state_with(orders: Arc<dyn OrdersDataService>) -> AppState {
        AppState {
            orders,
            db: Arc::new(AlwaysUp),
            service_info: crate::config::ServiceInfo {
                name: "test".to_string(),
                up_time: chrono::Utc::now(),
                environment: "test".to_string(),
                version: "0.0.0".to_string(),
            },
        }
    }

    fn in_memory_state(collection: InMemoryOrderCollection) -> AppState {
        state_with(Arc::new(OrdersService::new(collection)))
    }

    macro_rules! app {
        ($state:expr) => {{
            let state = $state;
            test::init_service(App::new().configure(move |cfg| configure(cfg, state))).await
        }};
    }

    #[actix_web::test]
    async fn create_then_get_by_id() {
        let app = app!(in_memory_state(InMemoryOrderCollection::new()));

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(json!({ "products": [{ "name": "test-prod", "price": 100 }] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let created: CreatedOrder = test::read_body_json(resp).await;
        assert_eq!(created.order_id.len(), 24);

        let req = test::TestRequest::get()
            .uri(&format!("/orders/{}", created.order_id))
            .to_request();
        let order: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(order["order_id"], created.order_id.as_str());
        assert_eq!(order["products"].as_array().unwrap().len(), 1);
        assert_eq!(order["products"][0]["name"], "test-prod");
        assert_eq!(order["products"][0]["price"], 100);
        assert!(!order["last_updated_at"].as_str().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn put_updates_existing_order_and_returns_count() {
        let app = app!(in_memory_state(InMemoryOrderCollection::new()));

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(json!({ "products": [] }))
            .to_request();
        let created: CreatedOrder = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/orders")
            .set_json(json!({
                "order_id": created.order_id,
                "products": [{ "name": "added", "price": 5 }]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let count: u64 = test::read_body_json(resp).await;
        assert_eq!(count, 1);

        let req = test::TestRequest::get()
            .uri(&format!("/orders/{}", created.order_id))
            .to_request();
        let order: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(order["products"][0]["name"], "added");
    }

    #[actix_web::test]
    async fn null_fields_are_accepted_as_empty() {
        let app = app!(in_memory_state(InMemoryOrderCollection::new()));

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(json!({ "last_updated_at": null, "products": null }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let created: CreatedOrder = test::read_body_json(resp).await;

        let req = test::TestRequest::get()
            .uri(&format!("/orders/{}", created.order_id))
            .to_request();
        let order: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(order["products"], json!([]));
    }

    #[actix_web::test]
    async fn prices_beyond_32_bits_are_kept() {
        let app = app!(in_memory_state(InMemoryOrderCollection::new()));

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(json!({ "products": [{ "name": "bulk", "price": 5_000_000_000u64 }] }))
            .to_request();
        let created: CreatedOrder = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::get()
            .uri(&format!("/orders/{}", created.order_id))
            .to_request();
        let order: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(order["products"][0]["price"], 5_000_000_000u64);
    }

    #[actix_web::test]
    async fn update_of_unknown_id_is_500() {
        let app = app!(in_memory_state(InMemoryOrderCollection::new()));

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(json!({ "order_id": "64b7f0c2e13a4a1f9c0d5e21", "products": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Unexpected Error occurred");
    }

    #[actix_web::test]
    async fn zero_order_id_takes_the_create_path() {
        let collection = InMemoryOrderCollection::new();
        let app = app!(in_memory_state(collection.clone()));

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(json!({ "order_id": "000000000000000000000000", "products": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(collection.len(), 1);
    }

    #[actix_web::test]
    async fn undecodable_body_is_400_and_skips_the_service() {
        let recorder = Arc::new(RecordingService::default());
        let app = app!(state_with(recorder.clone()));

        for body in [r#"{"products": "nope"}"#, r#"{"order_id": "xyz"}"#, "not json"] {
            let req = test::TestRequest::post()
                .uri("/orders")
                .insert_header(("content-type", "application/json"))
                .set_payload(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
            let envelope: Value = test::read_body_json(resp).await;
            assert_eq!(envelope["message"], "Invalid request body");
        }
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn create_failure_is_500() {
        let collection = InMemoryOrderCollection::new();
        collection.set_unavailable(true);
        let app = app!(in_memory_state(collection));

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(json!({ "products": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn get_all_returns_array_and_500_on_failure() {
        let collection = InMemoryOrderCollection::new();
        let app = app!(in_memory_state(collection.clone()));

        let req = test::TestRequest::get().uri("/orders").to_request();
        let orders: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(orders, json!([]));

        collection.set_unavailable(true);
        let req = test::TestRequest::get().uri("/orders").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let envelope: Value = test::read_body_json(resp).await;
        assert_eq!(envelope["message"], "Error occurred while retrieving purchase orders");
        assert!(envelope["error"].as_str().unwrap().contains("unavailable"));
    }

    #[actix_web::test]
    async fn get_all_returns_at_most_one_page() {
        let collection = InMemoryOrderCollection::new();
        let svc = OrdersService::new(collection.clone());
        for _ in 0..150 {
            svc.create(Order::new(vec![])).await.unwrap();
        }
        let app = app!(in_memory_state(collection));

        let req = test::TestRequest::get().uri("/orders").to_request();
        let orders: Vec<Order> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(orders.len(), 100);
    }

    #[actix_web::test]
    async fn empty_id_is_400_without_touching_the_service() {
        let recorder = Arc::new(RecordingService::default());
        let app = app!(state_with(recorder.clone()));

        let get = test::TestRequest::get().uri("/orders/").to_request();
        assert_eq!(test::call_service(&app, get).await.status(), StatusCode::BAD_REQUEST);

        let delete = test::TestRequest::delete().uri("/orders/").to_request();
        assert_eq!(test::call_service(&app, delete).await.status(), StatusCode::BAD_REQUEST);

        assert_eq!(recorder.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn unknown_id_is_200_with_null_body() {
        let app = app!(in_memory_state(InMemoryOrderCollection::new()));

        let req = test::TestRequest::get()
            .uri("/orders/64b7f0c2e13a4a1f9c0d5e21")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, Value::Null);
    }

    #[actix_web::test]
    async fn malformed_id_is_400() {
        let app = app!(in_memory_state(InMemoryOrderCollection::new()));

        let req = test::TestRequest::get().uri("/orders/not-hex").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Error to retrieve order details");

        let req = test::TestRequest::delete().uri("/orders/not-hex").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn delete_returns_count() {
        let app = app!(in_memory_state(InMemoryOrderCollection::new()));

        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(json!({ "products": [] }))
            .to_request();
        let created: CreatedOrder = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/orders/{}", created.order_id);

        let first: u64 =
            test::call_and_read_body_json(&app, test::TestRequest::delete().uri(&uri).to_request())
                .await;
        let second: u64 =
            test::call_and_read_body_json(&app, test::TestRequest::delete().uri(&uri).to_request())
                .await;

        assert_eq!(first, 1);
        assert_eq!(second, 0);
    }

    #[actix_web::test]
    async fn delete_failure_is_500() {
        let collection = InMemoryOrderCollection::new();
        collection.set_unavailable(true);
        let app = app!(in_memory_state(collection));

        let req = test::TestRequest::delete()
            .uri("/orders/64b7f0c2e13a4a1f9c0d5e21")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
