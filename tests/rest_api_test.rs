//! REST endpoints exercised through the full router

mod common;

use axum::{
    body::{to_bytes, Body},
    extract::ConnectInfo,
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::in_memory_service;
use sales_analytics::api::{build_router, AppState};
use sales_analytics::config::Config;
use sales_analytics::service::SalesService;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

fn app(service: Arc<SalesService>) -> Router {
    build_router(AppState::new(service), &Config::default())
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn test_health_and_index() {
    let service = in_memory_service();

    let (status, body) = send(app(service.clone()), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());

    let (status, body) = send(app(service), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["graphql"], "/graphql");
    assert_eq!(body["endpoints"]["docs"], "/api-docs");
}

#[tokio::test]
async fn test_create_get_delete_sale() {
    let service = in_memory_service();

    let (status, created) = send(
        app(service.clone()),
        Method::POST,
        "/v1/sales",
        Some(json!({
            "productName": "Office Chair",
            "category": "Furniture",
            "quantity": 3,
            "price": 249.99,
            "saleDate": "2025-10-17"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["totalAmount"], json!(749.97));
    assert_eq!(created["saleDate"], "2025-10-17");

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = send(app(service.clone()), Method::GET, &format!("/v1/sales/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["productName"], "Office Chair");

    let (status, _) = send(app(service.clone()), Method::DELETE, &format!("/v1/sales/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(app(service), Method::GET, &format!("/v1/sales/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_sale_validation_error() {
    let service = in_memory_service();

    let (status, body) = send(
        app(service),
        Method::POST,
        "/v1/sales",
        Some(json!({
            "productName": "Office Chair",
            "category": "Furniture",
            "quantity": 3,
            "price": -1.0,
            "saleDate": "2025-10-17"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_USER_INPUT");
    assert_eq!(body["error"]["errors"][0]["field"], "price");
    assert_eq!(body["error"]["errors"][0]["message"], "Price must be positive");
}

#[tokio::test]
async fn test_create_sale_total_overflow_is_rejected() {
    let service = in_memory_service();

    let (status, body) = send(
        app(service.clone()),
        Method::POST,
        "/v1/sales",
        Some(json!({
            "productName": "Cargo Ship",
            "category": "Marine",
            "quantity": 4_000_000_000u64,
            "price": 1e20,
            "saleDate": "2025-10-17"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["errors"][0]["field"], "price");
    assert_eq!(body["error"]["errors"][0]["message"], "Total amount is too large");

    // still serving
    let (status, _) = send(app(service), Method::GET, "/v1/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_sales_newest_first() {
    let service = in_memory_service();
    service.seed_demo_data().await.unwrap();

    let (status, body) = send(app(service), Method::GET, "/v1/sales", None).await;
    assert_eq!(status, StatusCode::OK);

    let sales = body.as_array().unwrap();
    assert_eq!(sales.len(), 10);
    assert_eq!(sales[0]["productName"], "Pen Pack");
    assert_eq!(sales[9]["productName"], "Laptop Pro");
}

#[tokio::test]
async fn test_analytics_as_of() {
    let service = in_memory_service();
    service.seed_demo_data().await.unwrap();

    let (status, body) = send(app(service.clone()), Method::GET, "/v1/analytics?asOf=2025-11-20", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kpis"]["totalSales"], 10);

    // 2025-11-20 minus 30 days is 2025-10-21
    let dates: Vec<&str> = body["trends"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates.first(), Some(&"2025-10-21"));
    assert_eq!(dates.len(), 4);

    let (status, body) = send(app(service), Method::GET, "/v1/analytics?asOf=yesterday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["errors"][0]["field"], "asOf");
}

#[tokio::test]
async fn test_sentiment_endpoints() {
    let service = in_memory_service();

    let (status, body) = send(
        app(service.clone()),
        Method::POST,
        "/v1/sentiment",
        Some(json!({ "text": "Excellent desk, love it!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "positive");
    assert_eq!(body["score"], 6);
    assert_eq!(body["positive"], json!(["excellent", "love"]));

    let (status, body) = send(
        app(service.clone()),
        Method::POST,
        "/v1/sentiment/batch",
        Some(json!({ "texts": ["not good", "fine"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["sentiment"], "negative");
    assert_eq!(body[1]["sentiment"], "positive");

    let long_text = "a".repeat(5001);
    let (status, body) = send(
        app(service.clone()),
        Method::POST,
        "/v1/sentiment",
        Some(json!({ "text": long_text })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_USER_INPUT");

    let (status, _) = send(
        app(service),
        Method::POST,
        "/v1/sentiment/batch",
        Some(json!({ "texts": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_graphql_route_is_mounted() {
    let service = in_memory_service();

    let (status, body) = send(
        app(service),
        Method::POST,
        "/graphql",
        Some(json!({ "query": "{ health { status } }" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["health"]["status"], "ok");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let _ = sales_analytics::metrics::init_metrics();
    let service = in_memory_service();

    send(app(service.clone()), Method::GET, "/health", None).await;

    let response = app(service)
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("sales_analytics_http_requests_total"));
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let service = in_memory_service();

    for uri in ["/health", "/v1/sales/999"] {
        let response = app(service.clone())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let headers = response.headers();

        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
        assert_eq!(headers["referrer-policy"], "no-referrer");
        assert_eq!(
            headers["strict-transport-security"],
            "max-age=15552000; includeSubDomains"
        );
        assert!(headers.get("content-security-policy").is_none());
    }
}

#[tokio::test]
async fn test_openapi_document_and_swagger_ui() {
    let service = in_memory_service();

    let (status, doc) = send(app(service.clone()), Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Sales Analytics API");
    assert!(doc["paths"]["/graphql"]["post"].is_object());
    assert!(doc["paths"]["/v1/sales/{id}"]["delete"].is_object());

    let response = app(service)
        .oneshot(Request::builder().uri("/api-docs/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_graphql_is_rate_limited_per_client() {
    let mut config = Config::default();
    config.rate_limit.max_requests = 2;
    let app = build_router(AppState::new(in_memory_service()), &config);

    let graphql = |ip: [u8; 4]| {
        let mut request = Request::builder()
            .method(Method::POST)
            .uri("/graphql")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "query": "{ health { status } }" }).to_string()))
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from((ip, 40000))));
        request
    };

    for _ in 0..2 {
        let response = app.clone().oneshot(graphql([10, 0, 0, 1])).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.clone().oneshot(graphql([10, 0, 0, 1])).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");
    assert_eq!(
        body["error"]["message"],
        "Too many requests from this IP, please try again later."
    );

    // other clients and REST routes are unaffected
    let response = app.clone().oneshot(graphql([10, 0, 0, 2])).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let (status, _) = send(app.clone(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limit_can_be_disabled() {
    let mut config = Config::default();
    config.rate_limit.enabled = false;
    config.rate_limit.max_requests = 1;
    let app = build_router(AppState::new(in_memory_service()), &config);

    for _ in 0..3 {
        let (status, _) = send(
            app.clone(),
            Method::POST,
            "/graphql",
            Some(json!({ "query": "{ health { status } }" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}
