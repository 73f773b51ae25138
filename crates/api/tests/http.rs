//! Router-level tests that exercise the HTTP surface without a database.
//!
//! The pool is created lazily and never connected; every route under test
//! either answers before touching the store (health, fallback, validation,
//! auth rejections) or is not exercised here. End-to-end flows against a
//! real `PostgreSQL` belong in an external integration run.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use loommarket_api::config::ApiConfig;
use loommarket_api::routes;
use loommarket_api::state::AppState;

fn test_app() -> Router {
    let config = ApiConfig {
        database_url: SecretString::from("postgres://localhost:1/loommarket_test"),
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
        port: 0,
        jwt_secret: SecretString::from("rQ8kP2mN9xV4bT7wZ3cF6hJ1lY5sD0gA"),
        token_ttl_hours: 24,
    };

    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost:1/loommarket_test")
        .expect("lazy pool");

    routes::app(AppState::new(config, pool))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn health_answers_ok() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn unknown_route_renders_error_envelope() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/no/such/route")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "not found");
}

#[tokio::test]
async fn cart_without_token_is_unauthorized() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/cart/1")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "You are not logged in! Please login to get access"
    );
}

#[tokio::test]
async fn cart_with_garbage_token_is_unauthorized() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/cart/1")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn cart_with_wrong_scheme_is_unauthorized() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/cart/1")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "You are not logged in! Please login to get access"
    );
}

#[tokio::test]
async fn add_to_cart_requires_token() {
    let request = json_request("POST", "/cart", json!({"userId": 1, "productId": 1}));
    let response = test_app().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn category_delete_requires_token() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/categories/1")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn blank_category_name_is_unprocessable() {
    let request = json_request("POST", "/categories", json!({"categoryName": "   "}));
    let response = test_app().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Category Name is required");
}

#[tokio::test]
async fn missing_category_name_is_unprocessable() {
    let request = json_request("POST", "/categories", json!({}));
    let response = test_app().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Category Name is required");
}

#[tokio::test]
async fn blank_product_name_is_rejected() {
    let request = json_request(
        "POST",
        "/products",
        json!({
            "name": "",
            "description": "Woven cotton",
            "category_id": 1,
            "price": "12.50",
            "stock_quantity": 5
        }),
    );
    let response = test_app().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Product name is required");
}

#[tokio::test]
async fn negative_stock_is_rejected() {
    let request = json_request(
        "POST",
        "/products",
        json!({
            "name": "Herringbone Tweed",
            "description": "Woven wool",
            "category_id": 1,
            "price": "24.00",
            "stock_quantity": -1
        }),
    );
    let response = test_app().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Stock quantity must be zero or a positive number");
}

#[tokio::test]
async fn product_update_requires_token() {
    let request = json_request(
        "PUT",
        "/products/1",
        json!({
            "name": "Herringbone Tweed",
            "description": "Woven wool",
            "category_id": 1,
            "price": "24.00",
            "stock_quantity": 5
        }),
    );
    let response = test_app().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "You are not logged in! Please login to get access"
    );
}

#[tokio::test]
async fn product_update_with_garbage_token_is_unauthorized() {
    let mut request = json_request(
        "PUT",
        "/products/1",
        json!({
            "name": "Herringbone Tweed",
            "description": "Woven wool",
            "category_id": 1,
            "price": "24.00",
            "stock_quantity": 5
        }),
    );
    request.headers_mut().insert(
        header::AUTHORIZATION,
        "Bearer not.a.token".parse().expect("header value"),
    );
    let response = test_app().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn login_with_malformed_email_is_invalid_credentials() {
    let request = json_request(
        "POST",
        "/user/login",
        json!({"user_email": "not-an-email", "user_password": "hunter2hunter2"}),
    );
    let response = test_app().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn signup_with_invalid_email_is_bad_request() {
    let request = json_request(
        "POST",
        "/user/signup",
        json!({
            "user_name": "Ada",
            "user_email": "nope",
            "user_password": "long enough password"
        }),
    );
    let response = test_app().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid email address");
}

#[tokio::test]
async fn signup_with_short_password_is_bad_request() {
    let request = json_request(
        "POST",
        "/user/signup",
        json!({
            "user_name": "Ada",
            "user_email": "ada@example.com",
            "user_password": "short"
        }),
    );
    let response = test_app().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
