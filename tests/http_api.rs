mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use pvz_service::{create_api_router, AppState, TxManager};

async fn app() -> Router {
    let db = common::setup_db().await;
    create_api_router(AppState::new(TxManager::new(db), common::test_jwt_config()))
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn token_for(app: &Router, role: &str) -> String {
    let (status, body) = send(app, "POST", "/dummyLogin", None, Some(json!({ "role": role }))).await;
    assert_eq!(status, StatusCode::OK);
    body.as_str().expect("token string").to_string()
}

#[tokio::test]
async fn full_flow_over_http() {
    let app = app().await;
    let moderator = token_for(&app, "moderator").await;
    let employee = token_for(&app, "employee").await;

    let (status, pvz) = send(&app, "POST", "/pvz", Some(&moderator), Some(json!({ "city": "Москва" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pvz["city"], "Москва");
    let pvz_id = pvz["id"].as_str().unwrap().to_string();
    assert!(pvz["registrationDate"].is_string());

    let (status, reception) = send(&app, "POST", "/receptions", Some(&employee), Some(json!({ "pvzId": pvz_id }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(reception["status"], "in_progress");

    let (status, product) = send(
        &app,
        "POST",
        "/products",
        Some(&employee),
        Some(json!({ "type": "электроника", "pvzId": pvz_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["type"], "электроника");
    assert_eq!(product["receptionId"], reception["id"]);

    let uri = format!("/pvz/{}/close_last_reception", pvz_id);
    let (status, closed) = send(&app, "POST", &uri, Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["status"], "close");

    let (status, list) = send(&app, "GET", "/pvz?page=1&limit=10", Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["totalCount"], 1);
    assert_eq!(list["items"][0]["pvz"]["id"], pvz_id.as_str());
    assert_eq!(list["items"][0]["receptions"][0]["products"][0]["type"], "электроника");
}

#[tokio::test]
async fn roles_are_enforced() {
    let app = app().await;
    let employee = token_for(&app, "employee").await;

    let (status, body) = send(&app, "POST", "/pvz", Some(&employee), Some(json!({ "city": "Казань" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Insufficient permissions");

    let (status, _) = send(&app, "POST", "/pvz", None, Some(json!({ "city": "Казань" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/pvz", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn business_errors_map_to_statuses() {
    let app = app().await;
    let moderator = token_for(&app, "moderator").await;
    let employee = token_for(&app, "employee").await;

    let (status, body) = send(&app, "POST", "/pvz", Some(&moderator), Some(json!({ "city": "Тверь" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Москва"));

    let (_, pvz) = send(&app, "POST", "/pvz", Some(&moderator), Some(json!({ "city": "Казань" }))).await;
    let pvz_id = pvz["id"].as_str().unwrap().to_string();

    let uri = format!("/pvz/{}/delete_last_product", pvz_id);
    let (status, _) = send(&app, "POST", &uri, Some(&employee), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = uuid::Uuid::new_v4();
    let (status, body) = send(&app, "POST", "/receptions", Some(&employee), Some(json!({ "pvzId": missing }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Pickup point not found.");

    let (status, _) = send(&app, "GET", "/pvz?limit=100", Some(&employee), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "POST", "/pvz/not-a-uuid/close_last_reception", Some(&employee), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_then_login() {
    let app = app().await;
    let credentials = json!({ "email": "clerk@example.com", "password": "secret1", "role": "employee" });

    let (status, user) = send(&app, "POST", "/register", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["role"], "employee");

    let (status, _) = send(&app, "POST", "/register", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, token) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "email": "clerk@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(token.is_string());

    let (status, _) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "email": "clerk@example.com", "password": "wrong-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_pings_the_database() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"]["status"], "ok");
}
