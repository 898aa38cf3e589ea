//! End-to-end API integration tests
//!
//! These tests drive the full router over an in-memory store:
//! - Device and measure CRUD flows
//! - Nested measures on device reads
//! - Cascade delete of a device's measures
//! - Error status codes and `detail` bodies

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use iot_registry_api::api;
use iot_registry_api::infrastructure::Store;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot

/// Setup test application over a fresh in-memory store
async fn setup_app() -> (Router, Store) {
    let store = Store::in_memory()
        .await
        .expect("Failed to open in-memory store");
    (api::router(store.clone()), store)
}

/// Send a request and decode the JSON response body
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

async fn create_device(app: &Router, nom: &str, mac: &str) -> Value {
    let (status, json) = send(
        app,
        "POST",
        "/devices/",
        Some(json!({ "nom": nom, "mac_address": mac })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "device creation failed: {}", json);
    json
}

async fn create_measure(app: &Router, device_id: i64, kind: &str, value: f64) -> Value {
    let (status, json) = send(
        app,
        "POST",
        "/measures/",
        Some(json!({ "type": kind, "mesure_value": value, "device_id": device_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "measure creation failed: {}", json);
    json
}

#[tokio::test]
async fn test_health_check() {
    let (app, _store) = setup_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_device_measure_cascade_scenario() {
    let (app, _store) = setup_app().await;

    // Step 1: Register a device
    let device = create_device(&app, "Sensor1", "AA:BB:CC:DD:EE:FF").await;
    assert_eq!(device["id"], 1);
    assert_eq!(device["nom"], "Sensor1");
    assert_eq!(device["mac_address"], "AA:BB:CC:DD:EE:FF");
    assert_eq!(device["location"], Value::Null);
    assert!(device["created_at"].is_string());
    assert_eq!(device["mesures"], json!([]));

    // Step 2: Attach a measure
    let measure = create_measure(&app, 1, "temp", 21.5).await;
    assert_eq!(measure["id"], 1);
    assert_eq!(measure["type"], "temp");
    assert_eq!(measure["mesure_value"], 21.5);
    assert!(measure["date"].is_string());
    assert!(measure.get("device_id").is_none(), "Measure shape has no device_id");

    // Step 3: Delete the device
    let (status, json) = send(&app, "DELETE", "/devices/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "detail": "Device deleted successfully" }));

    // Step 4: The measure went with it
    let (status, json) = send(&app, "GET", "/measures/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "detail": "Measure not found" }));
}

#[tokio::test]
async fn test_get_device_includes_measures() {
    let (app, _store) = setup_app().await;
    let device = create_device(&app, "Probe", "01:02:03:04:05:06").await;
    let id = device["id"].as_i64().unwrap();
    create_measure(&app, id, "temp", 19.0).await;
    create_measure(&app, id, "humidity", 55.0).await;

    let (status, json) = send(&app, "GET", &format!("/devices/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["created_at"], device["created_at"]);
    let mesures = json["mesures"].as_array().unwrap();
    assert_eq!(mesures.len(), 2);
    assert_eq!(mesures[0]["type"], "temp");
    assert_eq!(mesures[1]["type"], "humidity");
}

#[tokio::test]
async fn test_list_devices_and_measures() {
    let (app, _store) = setup_app().await;
    let first = create_device(&app, "A", "00:00:00:00:00:0A").await;
    let second = create_device(&app, "B", "00:00:00:00:00:0B").await;
    create_measure(&app, first["id"].as_i64().unwrap(), "temp", 1.0).await;
    create_measure(&app, second["id"].as_i64().unwrap(), "temp", 2.0).await;
    create_measure(&app, second["id"].as_i64().unwrap(), "temp", 3.0).await;

    let (status, devices) = send(&app, "GET", "/devices/", None).await;
    assert_eq!(status, StatusCode::OK);
    let devices = devices.as_array().unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0]["mesures"].as_array().unwrap().len(), 1);
    assert_eq!(devices[1]["mesures"].as_array().unwrap().len(), 2);

    let (status, measures) = send(&app, "GET", "/measures", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(measures.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_duplicate_mac_address_conflicts() {
    let (app, _store) = setup_app().await;
    create_device(&app, "First", "DE:AD:BE:EF:00:01").await;

    let (status, json) = send(
        &app,
        "POST",
        "/devices/",
        Some(json!({ "nom": "Second", "mac_address": "DE:AD:BE:EF:00:01" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["detail"].as_str().unwrap().contains("DE:AD:BE:EF:00:01"));

    let (_, devices) = send(&app, "GET", "/devices/", None).await;
    assert_eq!(devices.as_array().unwrap().len(), 1, "Device count unchanged");
}

#[tokio::test]
async fn test_update_device_round_trip() {
    let (app, _store) = setup_app().await;
    let device = create_device(&app, "Sensor", "10:20:30:40:50:60").await;
    let id = device["id"].as_i64().unwrap();
    create_measure(&app, id, "temp", 4.0).await;

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/devices/{}", id),
        Some(json!({
            "nom": "Sensor",
            "mac_address": "10:20:30:40:50:60",
            "location": "Basement"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["location"], "Basement");

    let (_, fetched) = send(&app, "GET", &format!("/devices/{}", id), None).await;
    assert_eq!(fetched["location"], "Basement");
    assert_eq!(fetched["nom"], device["nom"]);
    assert_eq!(fetched["mac_address"], device["mac_address"]);
    assert_eq!(fetched["created_at"], device["created_at"]);
    assert_eq!(fetched["mesures"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_missing_device_is_not_found() {
    let (app, _store) = setup_app().await;

    let (status, json) = send(
        &app,
        "PUT",
        "/devices/7",
        Some(json!({ "nom": "X", "mac_address": "X" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "detail": "Device not found" }));
}

#[tokio::test]
async fn test_get_and_delete_missing_device_are_not_found() {
    let (app, _store) = setup_app().await;

    let (status, json) = send(&app, "GET", "/devices/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["detail"], "Device not found");

    let (status, _) = send(&app, "DELETE", "/devices/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_measure_for_missing_device_is_not_found() {
    let (app, _store) = setup_app().await;

    let (status, json) = send(
        &app,
        "POST",
        "/measures/",
        Some(json!({ "type": "temp", "mesure_value": 1.0, "device_id": 404 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "detail": "Device not found" }));

    let (_, measures) = send(&app, "GET", "/measures/", None).await;
    assert_eq!(measures, json!([]), "No measure row created");
}

#[tokio::test]
async fn test_update_measure_ignores_owner_and_date() {
    let (app, _store) = setup_app().await;
    let first = create_device(&app, "A", "00:00:00:00:01:01").await;
    let other = create_device(&app, "B", "00:00:00:00:01:02").await;
    let measure = create_measure(&app, first["id"].as_i64().unwrap(), "temp", 20.0).await;
    let id = measure["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/measures/{}", id),
        Some(json!({
            "type": "  humidity ",
            "mesure_value": 60,
            "device_id": other["id"],
            "date": "2000-01-01T00:00:00Z"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["type"], "humidity");
    assert_eq!(updated["mesure_value"], 60.0);
    assert_eq!(updated["date"], measure["date"]);

    let (_, owner) = send(&app, "GET", &format!("/devices/{}", first["id"]), None).await;
    assert_eq!(owner["mesures"].as_array().unwrap().len(), 1);
    let (_, other) = send(&app, "GET", &format!("/devices/{}", other["id"]), None).await;
    assert_eq!(other["mesures"], json!([]));
}

#[tokio::test]
async fn test_measure_crud_not_found_paths() {
    let (app, _store) = setup_app().await;

    let (status, _) = send(&app, "GET", "/measures/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(
        &app,
        "PUT",
        "/measures/3",
        Some(json!({ "type": "temp", "mesure_value": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["detail"], "Measure not found");

    let (status, _) = send(&app, "DELETE", "/measures/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_measure() {
    let (app, _store) = setup_app().await;
    let device = create_device(&app, "A", "00:00:00:00:02:01").await;
    let measure = create_measure(&app, device["id"].as_i64().unwrap(), "temp", 1.0).await;

    let (status, json) = send(&app, "DELETE", &format!("/measures/{}", measure["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "detail": "Measure deleted successfully" }));

    let (_, device) = send(&app, "GET", &format!("/devices/{}", device["id"]), None).await;
    assert_eq!(device["mesures"], json!([]));
}

#[tokio::test]
async fn test_malformed_input_is_rejected() {
    let (app, _store) = setup_app().await;

    // Missing required field
    let (status, json) = send(&app, "POST", "/devices/", Some(json!({ "nom": "X" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["detail"].is_string());

    // Wrong type
    let (status, _) = send(
        &app,
        "POST",
        "/measures/",
        Some(json!({ "type": "temp", "mesure_value": "hot", "device_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Non-integer id
    let (status, json) = send(&app, "GET", "/devices/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"].is_string());

    let (_, devices) = send(&app, "GET", "/devices/", None).await;
    assert_eq!(devices, json!([]));
}
