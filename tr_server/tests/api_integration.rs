//! Integration tests for the HTTP API.
//!
//! Drives the axum router directly with `oneshot`, backed by a real engine,
//! and checks status codes, envelopes and the request-id header.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use table_reservation::{
    PoolSnapshot, ReservationError, ReservationReceipt, ReservationResult, ReservationService,
    TableService,
    engine::{Engine, EngineConfig},
    service::{ReservationManager, TableManager},
};
use tower::ServiceExt; // For `oneshot` method
use tr_server::api::{AppState, create_router, request_id::REQUEST_ID_HEADER};

/// Helper to create a router over a freshly spawned engine
fn create_test_app() -> axum::Router {
    let (engine, handle) = Engine::in_memory(&EngineConfig::default());
    tokio::spawn(engine.run());

    create_router(AppState {
        table_service: Arc::new(TableManager::new(handle.clone())),
        reservation_service: Arc::new(ReservationManager::new(handle)),
    })
}

/// Services that fail every call with an infrastructure error
struct UnavailableServices;

#[async_trait]
impl TableService for UnavailableServices {
    async fn initialize_tables(&self, _num_tables: i64) -> ReservationResult<()> {
        Err(ReservationError::EngineStopped)
    }

    fn available_tables(&self) -> i64 {
        0
    }

    async fn snapshot(&self) -> ReservationResult<PoolSnapshot> {
        Err(ReservationError::EngineStopped)
    }
}

#[async_trait]
impl ReservationService for UnavailableServices {
    async fn reserve_tables(&self, _num_customers: i64) -> ReservationResult<ReservationReceipt> {
        Err(ReservationError::Timeout(Duration::from_secs(5)))
    }

    async fn cancel_reservation(&self, _reservation_id: &str) -> ReservationResult<i64> {
        Err(ReservationError::Timeout(Duration::from_secs(5)))
    }
}

fn create_unavailable_app() -> axum::Router {
    let services = Arc::new(UnavailableServices);
    create_router(AppState {
        table_service: services.clone(),
        reservation_service: services,
    })
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send a request and return the status plus the parsed JSON body
async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn init_tables(app: &axum::Router, num_tables: i64) {
    let (status, _) = send(
        app,
        json_request("POST", "/public/table/init", json!({"num_tables": num_tables})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_liveness_check() {
    let app = create_test_app();

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"Healthy");
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_test_app();

    let (status, body) = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["engine"]["responsive"], true);
    assert_eq!(body["engine"]["initialized"], false);
}

#[tokio::test]
async fn test_health_check_reports_unavailable_engine() {
    let app = create_unavailable_app();

    let (status, body) = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["engine"]["responsive"], false);
}

// ============================================================================
// Table Tests
// ============================================================================

#[tokio::test]
async fn test_initialize_tables() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        json_request("POST", "/public/table/init", json!({"num_tables": 10})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"code": "SUCCESS", "data": {"total_tables": 10}}));
}

#[tokio::test]
async fn test_initialize_tables_twice_is_rejected() {
    let app = create_test_app();
    init_tables(&app, 10).await;

    let (status, body) = send(
        &app,
        json_request("POST", "/public/table/init", json!({"num_tables": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
    assert_eq!(body["data"], "tables already initialized");
}

#[tokio::test]
async fn test_initialize_tables_rejects_non_positive() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        json_request("POST", "/public/table/init", json!({"num_tables": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_initialize_tables_malformed_body() {
    let app = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/public/table/init")
        .header("content-type", "application/json")
        .body(Body::from("{\"num_tables\": \"ten\"}"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
    assert!(body["data"].is_string());
}

#[tokio::test]
async fn test_get_tables_snapshot() {
    let app = create_test_app();
    init_tables(&app, 10).await;

    send(
        &app,
        json_request("POST", "/secure/reservations", json!({"num_customers": 5})),
    )
    .await;

    let (status, body) = send(&app, empty_request("GET", "/public/table")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "SUCCESS");
    assert_eq!(body["data"]["total_tables"], 10);
    assert_eq!(body["data"]["available_tables"], 8);
    assert_eq!(body["data"]["reserved_tables"], 2);
    assert_eq!(body["data"]["reservations"].as_array().unwrap().len(), 1);
}

// ============================================================================
// Reservation Tests
// ============================================================================

#[tokio::test]
async fn test_reserve_and_cancel_flow() {
    let app = create_test_app();
    init_tables(&app, 10).await;

    let (status, body) = send(
        &app,
        json_request("POST", "/secure/reservations", json!({"num_customers": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "SUCCESS");
    assert_eq!(body["data"]["tables_reserved"], 2);
    assert_eq!(body["data"]["remaining_tables"], 8);
    let booking_id = body["data"]["booking_id"].as_str().unwrap().to_string();

    // 33 customers need 9 tables, only 8 left
    let (status, body) = send(
        &app,
        json_request("POST", "/secure/reservations", json!({"num_customers": 33})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
    assert!(body["data"].as_str().unwrap().contains("not enough tables"));

    let (status, body) = send(
        &app,
        empty_request("DELETE", &format!("/secure/reservations/{}", booking_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"code": "SUCCESS", "data": {"freed_tables": 2, "remaining_tables": 10}})
    );
}

#[tokio::test]
async fn test_reserve_before_initialize() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        json_request("POST", "/secure/reservations", json!({"num_customers": 4})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"], "tables have not been initialized");
}

#[tokio::test]
async fn test_reserve_rejects_non_positive_customers() {
    let app = create_test_app();
    init_tables(&app, 10).await;

    let (status, body) = send(
        &app,
        json_request("POST", "/secure/reservations", json!({"num_customers": -3})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_reserve_missing_field() {
    let app = create_test_app();
    init_tables(&app, 10).await;

    let (status, body) = send(&app, json_request("POST", "/secure/reservations", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_cancel_unknown_reservation() {
    let app = create_test_app();
    init_tables(&app, 10).await;

    let (status, body) = send(
        &app,
        empty_request("DELETE", "/secure/reservations/does-not-exist"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
    assert!(body["data"].as_str().unwrap().contains("does-not-exist"));
}

#[tokio::test]
async fn test_unavailable_engine_maps_to_503() {
    let app = create_unavailable_app();

    let (status, body) = send(
        &app,
        json_request("POST", "/secure/reservations", json!({"num_customers": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");

    let (status, body) = send(
        &app,
        json_request("POST", "/public/table/init", json!({"num_tables": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
}

// ============================================================================
// Request ID Tests
// ============================================================================

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/public/table")
        .header(REQUEST_ID_HEADER, "trace-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "trace-42");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = create_test_app();

    let response = app
        .oneshot(empty_request("GET", "/public/table"))
        .await
        .unwrap();

    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn test_concurrent_http_reservations_never_oversell() {
    let app = create_test_app();
    init_tables(&app, 10).await;

    let calls: Vec<_> = (0..20)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                send(
                    &app,
                    json_request("POST", "/secure/reservations", json!({"num_customers": 4})),
                )
                .await
                .0
            })
        })
        .collect();

    let mut accepted = 0;
    for call in calls {
        if call.await.unwrap() == StatusCode::OK {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 10);
    let (_, body) = send(&app, empty_request("GET", "/public/table")).await;
    assert_eq!(body["data"]["available_tables"], 0);
}
