mod common;

use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{
    inventory_payload, manufacturer, product_payload, send, send_raw, test_app, user_payload,
};

const DISPATCH: &str = "/api/dispatch";

fn action(name: &str) -> String {
    format!("{DISPATCH}?action={name}")
}

#[tokio::test]
async fn create_user_then_login() {
    let (app, _) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        &action("createUser"),
        Some(user_payload("pharm01", "s3cret")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user_id"], "pharm01");
    assert!(body["data"].get("password_hash").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        &action("loginUser"),
        Some(json!({"user_id": "pharm01", "user_pass": "s3cret"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let token = body["data"]["token"].as_str().expect("token");
    assert!(token.starts_with("Bearer "));

    let (status, body) = send(
        &app,
        Method::POST,
        &action("loginUser"),
        Some(json!({"user_id": "pharm01", "user_pass": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn duplicate_user_is_a_failure_envelope() {
    let (app, _) = test_app().await;
    let uri = action("createUser");

    let (status, _) = send(&app, Method::POST, &uri, Some(user_payload("dup", "pw"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, &uri, Some(user_payload("dup", "pw"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User ID already exists.");
}

#[tokio::test]
async fn inactive_user_cannot_log_in() {
    let (app, _) = test_app().await;
    let mut payload = user_payload("idle", "pw");
    payload["user_status"] = json!(0);
    let (status, _) = send(&app, Method::POST, &action("createUser"), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        &action("loginUser"),
        Some(json!({"user_id": "idle", "user_pass": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "User account is inactive.");
}

#[tokio::test]
async fn missing_user_fields_yield_400() {
    let (app, _) = test_app().await;
    for field in ["user_id", "user_pass", "user_department", "user_type", "user_status"] {
        let mut payload = user_payload("someone", "pw");
        payload.as_object_mut().unwrap().remove(field);
        let (status, body) = send(&app, Method::POST, &action("createUser"), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(body["message"], "Missing required fields for user creation.");
    }

    let (status, body) = send(
        &app,
        Method::POST,
        &action("loginUser"),
        Some(json!({"user_id": "someone"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing user ID or password for login.");
}

#[tokio::test]
async fn malformed_json_reports_missing_fields() {
    let (app, _) = test_app().await;
    let (status, body) = send_raw(&app, Method::POST, &action("createProduct"), "{oops").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields for product creation.");
}

#[tokio::test]
async fn create_product_then_fetch_by_id() {
    let (app, state) = test_app().await;
    let maker = manufacturer(&state, "Pfizer").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &action("createProduct"),
        Some(product_payload(maker, "02238830")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let id = body["data"]["ProductID"].as_i64().expect("product id");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("{}&id={id}", action("getProductById")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ProductName"], "Amoxil");
    assert_eq!(body["data"]["ManufacturerName"], "Pfizer");
    assert_eq!(body["data"]["ATC_Code"], "J01CA04");
    assert_eq!(body["data"]["PrescriptionRequired"], true);

    let (status, body) = send(&app, Method::GET, &action("getProducts"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn product_fields_are_each_required() {
    let (app, state) = test_app().await;
    let maker = manufacturer(&state, "Teva").await;

    for field in [
        "ProductName",
        "GenericName",
        "Strength",
        "PharmaceuticalForm",
        "RouteOfAdministration",
        "ManufacturerID",
        "ATC_Code",
        "Description",
        "PrescriptionRequired",
        "DrugIdentificationNumber",
    ] {
        let mut payload = product_payload(maker, "111");
        payload.as_object_mut().unwrap().remove(field);
        let (status, body) =
            send(&app, Method::POST, &action("createProduct"), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(body["message"], "Missing required fields for product creation.");
    }
}

#[tokio::test]
async fn empty_description_and_false_prescription_are_accepted() {
    let (app, state) = test_app().await;
    let maker = manufacturer(&state, "Apotex").await;
    let mut payload = product_payload(maker, "00559407");
    payload["Description"] = json!("");
    payload["PrescriptionRequired"] = json!(0);

    let (status, body) = send(&app, Method::POST, &action("createProduct"), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["PrescriptionRequired"], false);
}

#[tokio::test]
async fn unknown_manufacturer_is_a_failure_envelope() {
    let (app, _) = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        &action("createProduct"),
        Some(product_payload(999, "02238830")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn get_product_by_id_validates_and_reports_missing() {
    let (app, _) = test_app().await;

    let (status, body) = send(&app, Method::GET, &action("getProductById"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product ID is missing or invalid.");

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("{}&id=abc", action("getProductById")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("{}&id=42", action("getProductById")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found.");
}

#[tokio::test]
async fn update_product_applies_partial_changes() {
    let (app, state) = test_app().await;
    let maker = manufacturer(&state, "Pfizer").await;
    let (_, body) = send(
        &app,
        Method::POST,
        &action("createProduct"),
        Some(product_payload(maker, "02238830")),
    )
    .await;
    let id = body["data"]["ProductID"].as_i64().expect("product id");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("{}&id={id}", action("updateProduct")),
        Some(json!({"ProductID": id, "Strength": "250 mg", "PrescriptionRequired": "0"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["Strength"], "250 mg");
    assert_eq!(body["data"]["PrescriptionRequired"], false);
    assert_eq!(body["data"]["ProductName"], "Amoxil");
}

#[tokio::test]
async fn update_nonexistent_product_is_a_failure_envelope() {
    let (app, _) = test_app().await;
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("{}&id=9999", action("updateProduct")),
        Some(json!({"ProductName": "Ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Product not found.");
}

#[tokio::test]
async fn update_without_id_or_data_yields_400() {
    let (app, _) = test_app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &action("updateProduct"),
        Some(json!({"ProductName": "Nameless"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product ID or data missing for update.");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("{}&id=1", action("updateProduct")),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product ID or data missing for update.");
}

#[tokio::test]
async fn second_delete_reports_failure() {
    let (app, state) = test_app().await;
    let maker = manufacturer(&state, "Pfizer").await;
    let (_, body) = send(
        &app,
        Method::POST,
        &action("createProduct"),
        Some(product_payload(maker, "02238830")),
    )
    .await;
    let id = body["data"]["ProductID"].as_i64().expect("product id");
    let uri = format!("{}&id={id}", action("deleteProduct"));

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send(&app, Method::DELETE, &action("deleteProduct"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product ID missing for delete.");
}

#[tokio::test]
async fn unknown_actions_yield_400() {
    let (app, _) = test_app().await;
    let cases = [
        (Method::POST, "Invalid POST action."),
        (Method::GET, "Invalid GET action."),
        (Method::PUT, "Invalid PUT action."),
        (Method::DELETE, "Invalid DELETE action."),
    ];
    for (method, message) in cases {
        let (status, body) = send(&app, method, &action("launchRocket"), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], message);
    }
}

#[tokio::test]
async fn missing_action_yields_400() {
    let (app, _) = test_app().await;
    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let (status, body) = send(&app, method, DISPATCH, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Action not specified.");
    }
    let (status, body) = send(&app, Method::GET, DISPATCH, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid GET action.");
}

#[tokio::test]
async fn unsupported_method_yields_405() {
    let (app, _) = test_app().await;
    let (status, body) = send(&app, Method::PATCH, &action("updateProduct"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Method not allowed.");
}

#[tokio::test]
async fn plain_options_request_is_acknowledged() {
    let (app, _) = test_app().await;
    let (status, body) = send(&app, Method::OPTIONS, DISPATCH, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Preflight OK");
}

#[tokio::test]
async fn cors_preflight_keeps_headers_and_acknowledges() {
    let (app, _) = test_app().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(action("createProduct"))
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .expect("build request");
    let response = app.oneshot(request).await.expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["message"], "Preflight OK");
}

#[tokio::test]
async fn product_with_inventory_cannot_be_deleted() {
    let (app, state) = test_app().await;
    let maker = manufacturer(&state, "Pfizer").await;
    let (_, body) = send(
        &app,
        Method::POST,
        &action("createProduct"),
        Some(product_payload(maker, "02238830")),
    )
    .await;
    let id = body["data"]["ProductID"].as_i64().expect("product id");
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/inventory",
        Some(inventory_payload(id, "LOT-1", 10)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("{}&id={id}", action("deleteProduct"));
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Product has inventory records and cannot be deleted.");

    let (status, _) = send(&app, Method::GET, &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn update_product_rejects_taken_din_and_unknown_manufacturer() {
    let (app, state) = test_app().await;
    let maker = manufacturer(&state, "Pfizer").await;
    for din in ["02238830", "00559407"] {
        let (status, _) = send(
            &app,
            Method::POST,
            &action("createProduct"),
            Some(product_payload(maker, din)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (_, body) = send(&app, Method::GET, &action("getProducts"), None).await;
    let second = body["data"]
        .as_array()
        .and_then(|products| {
            products
                .iter()
                .find(|p| p["DrugIdentificationNumber"] == "00559407")
        })
        .and_then(|p| p["ProductID"].as_i64())
        .expect("second product");
    let uri = format!("{}&id={second}", action("updateProduct"));

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"DrugIdentificationNumber": "02238830"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "A product with this drug identification number already exists.");

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"ManufacturerID": 777}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Manufacturer 777 does not exist.");

    let (_, body) = send(&app, Method::GET, &format!("/api/products/{second}"), None).await;
    assert_eq!(body["data"]["DrugIdentificationNumber"], "00559407");
    assert_eq!(body["data"]["ManufacturerID"], maker);
}

#[tokio::test]
async fn update_without_id_is_reported_before_body_errors() {
    let (app, _) = test_app().await;
    let (status, body) = send(
        &app,
        Method::PUT,
        &action("updateProduct"),
        Some(json!({"ProductName": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product ID or data missing for update.");
}
