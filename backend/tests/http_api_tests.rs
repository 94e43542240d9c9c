//! End-to-end tests driving the axum router with `tower::ServiceExt::oneshot`.

#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use support::seed;
use villa_api::db::{LocalStore, VillaStore};
use villa_api::http::{create_router, AppState};

fn app(store: &LocalStore) -> Router {
    create_router(AppState::new(Arc::new(store.clone()) as VillaStore))
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn villa_json(name: &str) -> Value {
    json!({
        "name": name,
        "details": "Garden",
        "rate": 120.5,
        "occupancy": 3,
        "sqft": 410,
        "imageUrl": "https://img.example/g.jpg",
        "amenity": "Wifi"
    })
}

fn assert_failure(body: &Value, status: u16) {
    assert_eq!(body["statusCode"], status);
    assert_eq!(body["isSuccess"], false);
    assert!(!body["errorMessages"].as_array().unwrap().is_empty());
    assert!(body["result"].is_null());
}

#[tokio::test]
async fn test_health_endpoint() {
    let store = LocalStore::new();
    let (status, body) = send(app(&store), empty_request(Method::GET, "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_list_villas_envelope() {
    let store = LocalStore::new();
    seed(&store, "Royal");

    let (status, body) = send(app(&store), empty_request(Method::GET, "/api/VillaAPI")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["isSuccess"], true);
    assert_eq!(body["errorMessages"], json!([]));
    assert_eq!(body["result"][0]["name"], "Royal");
    assert!(body["result"][0].get("createdDate").is_none());
}

#[tokio::test]
async fn test_create_returns_201_with_location() {
    let store = LocalStore::new();
    let response = app(&store)
        .oneshot(json_request(Method::POST, "/api/VillaAPI", villa_json("Garden")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(location, "/api/VillaAPI/1");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["result"]["id"], 1);
    assert_eq!(body["result"]["imageUrl"], "https://img.example/g.jpg");
}

#[tokio::test]
async fn test_create_duplicate_is_400_envelope() {
    let store = LocalStore::new();
    seed(&store, "Garden");

    let (status, body) = send(
        app(&store),
        json_request(Method::POST, "/api/VillaAPI", villa_json("Garden")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, 400);
    assert_eq!(body["errorMessages"], json!(["Villa already exists!"]));
    assert_eq!(store.villa_count(), 1);
}

#[tokio::test]
async fn test_create_without_body_is_400_envelope() {
    let store = LocalStore::new();
    let (status, body) = send(app(&store), empty_request(Method::POST, "/api/VillaAPI")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, 400);
}

#[tokio::test]
async fn test_create_with_malformed_body_is_400_envelope() {
    let store = LocalStore::new();
    let (status, body) = send(
        app(&store),
        json_request(Method::POST, "/api/VillaAPI", json!({"details": "no name"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, 400);
}

#[tokio::test]
async fn test_get_by_id_paths() {
    let store = LocalStore::new();
    let id = seed(&store, "Royal");

    let (status, body) = send(
        app(&store),
        empty_request(Method::GET, &format!("/api/VillaAPI/{}", id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["id"], id.value());

    let (status, body) = send(app(&store), empty_request(Method::GET, "/api/VillaAPI/0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, 400);

    let (status, body) = send(app(&store), empty_request(Method::GET, "/api/VillaAPI/77")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&body, 404);
}

#[tokio::test]
async fn test_non_numeric_id_is_400_envelope() {
    let store = LocalStore::new();
    let (status, body) = send(app(&store), empty_request(Method::GET, "/api/VillaAPI/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, 400);
}

#[tokio::test]
async fn test_update_flow() {
    let store = LocalStore::new();
    let id = seed(&store, "Royal");
    let uri = format!("/api/VillaAPI/{}", id);

    let mut payload = villa_json("Royal Suite");
    payload["id"] = json!(id.value());
    let (status, body) = send(app(&store), json_request(Method::PUT, &uri, payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["name"], "Royal Suite");
    assert_eq!(store.villa(id).unwrap().name, "Royal Suite");

    payload["id"] = json!(id.value() + 1);
    let (status, body) = send(app(&store), json_request(Method::PUT, &uri, payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, 400);
}

#[tokio::test]
async fn test_update_missing_villa_is_404() {
    let store = LocalStore::new();
    let mut payload = villa_json("Ghost");
    payload["id"] = json!(12);

    let (status, body) = send(
        app(&store),
        json_request(Method::PUT, "/api/VillaAPI/12", payload),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&body, 404);
}

#[tokio::test]
async fn test_delete_flow() {
    let store = LocalStore::new();
    let id = seed(&store, "Royal");
    let uri = format!("/api/VillaAPI/{}", id);

    let (status, body) = send(app(&store), empty_request(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isSuccess"], true);
    assert!(body["result"].is_null());
    assert_eq!(store.villa_count(), 0);

    let (status, body) = send(app(&store), empty_request(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&body, 404);
}

#[tokio::test]
async fn test_store_fault_is_500_envelope() {
    let store = LocalStore::new();
    store.set_healthy(false);

    let (status, body) = send(app(&store), empty_request(Method::GET, "/api/VillaAPI")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_failure(&body, 500);
    let message = body["errorMessages"][0].as_str().unwrap();
    assert!(message.contains("Database is not healthy"));
}
