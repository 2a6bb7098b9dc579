#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, Response, StatusCode, header},
};
use pharmacy_inventory_api::{
    db::{create_orm_conn, run_migrations},
    routes,
    services::lookup_service,
    state::AppState,
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Fresh in-memory SQLite database with the schema applied.
pub async fn test_state() -> AppState {
    // A single connection keeps every query on the same in-memory database.
    let orm = create_orm_conn("sqlite::memory:", 1)
        .await
        .expect("connect in-memory sqlite");
    run_migrations(&orm).await.expect("run migrations");
    AppState::new(orm, "test-secret")
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (routes::app(state.clone()), state)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");
    send_request(app, request).await
}

pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    raw: &'static str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw))
        .expect("build request");
    send_request(app, request).await
}

pub async fn send_response(app: &Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    app.clone().oneshot(request).await.expect("router response")
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

pub async fn manufacturer(state: &AppState, name: &str) -> i32 {
    lookup_service::create_manufacturer(state, name.to_string())
        .await
        .expect("create manufacturer")
        .data
        .expect("manufacturer data")
        .id
}

pub async fn customer(state: &AppState, name: &str) -> i32 {
    lookup_service::create_customer(state, name.to_string())
        .await
        .expect("create customer")
        .data
        .expect("customer data")
        .id
}

pub fn product_payload(manufacturer_id: i32, din: &str) -> Value {
    json!({
        "ProductName": "Amoxil",
        "GenericName": "Amoxicillin",
        "Strength": "500 mg",
        "PharmaceuticalForm": "Capsule",
        "RouteOfAdministration": "Oral",
        "ManufacturerID": manufacturer_id.to_string(),
        "ATC_Code": "J01CA04",
        "Description": "Broad-spectrum penicillin",
        "PrescriptionRequired": 1,
        "DrugIdentificationNumber": din
    })
}

pub fn inventory_payload(product_id: i64, batch: &str, quantity: i32) -> Value {
    json!({
        "ProductID": product_id.to_string(),
        "BatchNumber": batch,
        "ExpiryDate": "2030-06-30",
        "QuantityInStock": quantity.to_string(),
        "Location": "Shelf B",
        "CostPrice": "2.50",
        "SellingPrice": "4.25"
    })
}

pub fn user_payload(user_id: &str, password: &str) -> Value {
    json!({
        "user_id": user_id,
        "user_pass": password,
        "user_department": "Dispensary",
        "user_type": "pharmacist",
        "user_status": 1
    })
}
