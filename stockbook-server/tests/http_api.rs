//! HTTP surface tests
//!
//! Drives the full router (middleware included) with in-process requests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::util::ServiceExt;

use stockbook_server::api::build_app;
use stockbook_server::core::{Config, ServerState};
use stockbook_server::db::DbService;

async fn test_app() -> (Router, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let service = DbService::new(&tmp.path().join("test.db").to_string_lossy())
        .await
        .unwrap();
    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    let state = ServerState::new(config, service.db);
    (build_app(state), tmp)
}

fn as_manager(builder: http::request::Builder) -> http::request::Builder {
    builder
        .header("x-actor-id", "manager-1")
        .header("x-actor-role", "manager")
}

fn json_request(
    method: &str,
    uri: &str,
    body: Value,
    builder: http::request::Builder,
) -> Request<Body> {
    builder
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn create_product(app: &Router, sku: &str, quantity: i64, reorder_point: i64) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/products",
            json!({
                "sku": sku,
                "name": format!("Product {sku}"),
                "category": "test",
                "price": 2.5,
                "quantity": quantity,
                "autoReorderEnabled": true,
                "reorderPoint": reorder_point,
                "reorderQuantity": 20,
                "supplierInfo": { "name": "Acme", "email": "orders@acme.example" }
            }),
            as_manager(Request::builder()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (app, _tmp) = test_app().await;
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn trigger_scan_creates_and_then_suppresses() {
    let (app, _tmp) = test_app().await;
    create_product(&app, "HTTP-1", 3, 5).await;

    let request = as_manager(Request::builder())
        .method("POST")
        .uri("/api/reorders/check-triggers")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["reordersCreated"], 1);
    let reorder = &body["data"]["reorders"][0];
    assert_eq!(reorder["status"], "pending");
    assert_eq!(reorder["triggerReason"], "low_stock");
    assert_eq!(reorder["quantity"], 20);
    assert_eq!(reorder["createdBy"], "manager-1");

    // Second scan finds the open reorder and does nothing
    let request = as_manager(Request::builder())
        .method("POST")
        .uri("/api/reorders/check-triggers")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["reordersCreated"], 0);
}

#[tokio::test]
async fn actor_header_is_required() {
    let (app, _tmp) = test_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/reorders/check-triggers")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("x-actor-id"));
}

#[tokio::test]
async fn staff_cannot_touch_procurement() {
    let (app, _tmp) = test_app().await;
    let product_id = create_product(&app, "HTTP-2", 50, 5).await;

    let request = json_request(
        "POST",
        "/api/reorders/manual",
        json!({ "productId": product_id, "quantity": 10 }),
        Request::builder()
            .header("x-actor-id", "staff-1")
            .header("x-actor-role", "staff"),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    // Same request with a manager role goes through, with the product
    // summary filled in
    let request = json_request(
        "POST",
        "/api/reorders/manual",
        json!({ "productId": product_id, "quantity": 10 }),
        as_manager(Request::builder()),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["triggerReason"], "manual");
    assert_eq!(body["data"]["quantity"], 10);
    assert_eq!(body["data"]["productName"], "Product HTTP-2");
    assert_eq!(body["data"]["productSku"], "HTTP-2");
}

#[tokio::test]
async fn status_lifecycle_over_http() {
    let (app, _tmp) = test_app().await;
    let product_id = create_product(&app, "HTTP-3", 3, 5).await;

    let request = json_request(
        "POST",
        "/api/reorders/manual",
        json!({ "productId": product_id, "quantity": 20 }),
        as_manager(Request::builder()),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let reorder_id = body["data"]["id"].as_str().unwrap().to_string();

    // pending -> received replenishes the product
    let request = json_request(
        "PATCH",
        &format!("/api/reorders/{reorder_id}/status"),
        json!({ "status": "received", "cost": 49.99 }),
        as_manager(Request::builder()),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "received");
    assert_eq!(body["data"]["cost"], 49.99);
    assert_eq!(body["data"]["productSku"], "HTTP-3");
    assert!(body["data"]["actualDelivery"].is_i64());

    let request = Request::builder()
        .uri(format!("/api/products/{product_id}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quantity"], 23);

    // received is terminal
    let request = json_request(
        "PATCH",
        &format!("/api/reorders/{reorder_id}/status"),
        json!({ "status": "cancelled" }),
        as_manager(Request::builder()),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Invalid status transition")
    );
}

#[tokio::test]
async fn listing_and_stats_shapes() {
    let (app, _tmp) = test_app().await;
    let product_id = create_product(&app, "HTTP-4", 50, 5).await;

    for _ in 0..3 {
        let request = json_request(
            "POST",
            "/api/reorders/manual",
            json!({ "productId": product_id, "quantity": 5 }),
            as_manager(Request::builder()),
        );
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
    }

    let request = Request::builder()
        .uri("/api/reorders?page=1&limit=2&status=pending")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["data"].as_array().unwrap().len(), 2);
    assert_eq!(data["total"], 3);
    assert_eq!(data["totalPages"], 2);
    assert_eq!(data["hasNext"], true);
    assert_eq!(data["hasPrev"], false);

    let request = Request::builder()
        .uri("/api/reorders/stats")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalReorders"], 3);
    assert_eq!(body["data"]["pending"], 3);
    assert_eq!(body["data"]["recent"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["recent"][0]["productSku"], "HTTP-4");

    // productId filter narrows to that product's reorders
    let request = Request::builder()
        .uri(format!("/api/reorders?productId={product_id}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 3);

    // Unknown status filter is rejected, not ignored
    let request = Request::builder()
        .uri("/api/reorders?status=bogus")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_validation_and_duplicate_sku() {
    let (app, _tmp) = test_app().await;

    // Negative price rejected
    let request = json_request(
        "POST",
        "/api/products",
        json!({ "sku": "BAD-1", "name": "Bad", "price": -1.0 }),
        as_manager(Request::builder()),
    );
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Duplicate SKU rejected
    create_product(&app, "HTTP-5", 10, 5).await;
    let request = json_request(
        "POST",
        "/api/products",
        json!({ "sku": "HTTP-5", "name": "Clone", "price": 1.0 }),
        as_manager(Request::builder()),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("HTTP-5"));
}

#[tokio::test]
async fn orders_decrement_stock_and_reject_oversell() {
    let (app, _tmp) = test_app().await;
    let product_id = create_product(&app, "HTTP-6", 10, 2).await;

    let request = json_request(
        "POST",
        "/api/orders",
        json!({ "items": [{ "productId": product_id, "quantity": 4 }], "customerName": "Walk-in" }),
        as_manager(Request::builder()),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 10.0);
    assert_eq!(body["data"]["items"][0]["quantity"], 4);

    let request = Request::builder()
        .uri(format!("/api/products/{product_id}"))
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(&app, request).await;
    assert_eq!(body["data"]["quantity"], 6);

    // 7 > 6 in stock: rejected, stock untouched
    let request = json_request(
        "POST",
        "/api/orders",
        json!({ "items": [{ "productId": product_id, "quantity": 7 }] }),
        as_manager(Request::builder()),
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("insufficient stock"));

    let request = Request::builder()
        .uri(format!("/api/products/{product_id}"))
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(&app, request).await;
    assert_eq!(body["data"]["quantity"], 6);
}

#[tokio::test]
async fn dashboard_aggregates_all_three_domains() {
    let (app, _tmp) = test_app().await;
    let product_id = create_product(&app, "HTTP-7", 3, 5).await;
    create_product(&app, "HTTP-8", 50, 5).await;

    let request = json_request(
        "POST",
        "/api/orders",
        json!({ "items": [{ "productId": product_id, "quantity": 1 }] }),
        as_manager(Request::builder()),
    );
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder()
        .uri("/api/dashboard/stats")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["productCount"], 2);
    assert_eq!(data["lowStockCount"], 1);
    assert_eq!(data["orderCount"], 1);
    assert_eq!(data["revenue"], 2.5);
    // 2 * 2.5 remaining on HTTP-7 plus 50 * 2.5 on HTTP-8
    assert_eq!(data["inventoryValue"], 130.0);
}
