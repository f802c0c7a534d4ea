//! Tests del router completo sin base de datos
//!
//! Todos los casos se resuelven antes de tocar PostgreSQL: autenticación,
//! roles, validación de entrada y filtros mal formados.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use tractor_agency::models::user::UserRole;

use common::{bearer, expired_token_for, lazy_state, server, token_for};

#[tokio::test]
async fn test_health_check() {
    let server = server(lazy_state());
    let response = server.get("/api/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let server = server(lazy_state());

    for path in [
        "/api/me",
        "/api/tractors",
        "/api/parts",
        "/api/services",
        "/api/expenses",
        "/api/expenses/summary",
        "/api/dashboard",
        "/api/reports/profit-loss",
        "/api/reports/transactions",
        "/api/tractors/brands",
        "/api/parts/names",
    ] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", path);
        let body: Value = response.json();
        assert_eq!(body["code"], "UNAUTHORIZED", "{}", path);
    }
}

#[tokio::test]
async fn test_malformed_and_expired_tokens_rejected() {
    let state = lazy_state();
    let expired = expired_token_for(&state, UserRole::Admin);
    let server = server(state);

    let (name, value) = bearer("not-a-jwt");
    let response = server.get("/api/tractors").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let (name, value) = bearer(&expired);
    let response = server.get("/api/tractors").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/tractors")
        .add_header(
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderValue::from_static("Basic YWRtaW46YWRtaW4xMjM="),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let mut other_config = common::test_config("postgres://nobody@127.0.0.1:1/unused");
    other_config.jwt_secret = "another-secret".to_string();
    let other_jwt = tractor_agency::utils::jwt::JwtService::new(
        &tractor_agency::utils::jwt::JwtConfig::from(&other_config),
    );
    let forged = other_jwt.issue(&common::user(1, UserRole::Admin)).unwrap().token;

    let server = server(lazy_state());
    let (name, value) = bearer(&forged);
    let response = server.get("/api/dashboard").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_manager_cannot_read_profit_loss() {
    let state = lazy_state();
    let token = token_for(&state, UserRole::Manager);
    let server = server(state);

    let (name, value) = bearer(&token);
    let response = server.get("/api/reports/profit-loss").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_manager_cannot_manage_users() {
    let state = lazy_state();
    let token = token_for(&state, UserRole::Manager);
    let server = server(state);

    let (name, value) = bearer(&token);
    let response = server
        .post("/api/users")
        .add_header(name, value)
        .json(&json!({
            "username": "clerk",
            "password": "secret123",
            "full_name": "Clerk",
            "role": "manager"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_profit_loss_with_inverted_window_is_bad_request() {
    let state = lazy_state();
    let token = token_for(&state, UserRole::Admin);
    let server = server(state);

    let (name, value) = bearer(&token);
    let response = server
        .get("/api/reports/profit-loss?start_date=2025-06-01&end_date=2025-01-01")
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_login_is_validation_error() {
    let server = server(lazy_state());
    let response = server.post("/api/login").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_tractor_without_brand_is_validation_error() {
    let state = lazy_state();
    let token = token_for(&state, UserRole::Manager);
    let server = server(state);

    let (name, value) = bearer(&token);
    let response = server
        .post("/api/tractors")
        .add_header(name, value)
        .json(&json!({ "model": "385", "purchase_price": 500000 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_exchange_sale_without_trade_in_is_validation_error() {
    let state = lazy_state();
    let token = token_for(&state, UserRole::Manager);
    let server = server(state);

    let (name, value) = bearer(&token);
    let response = server
        .post("/api/tractors/1/sell")
        .add_header(name, value)
        .json(&json!({
            "sale_price": 700000,
            "customer_name": "Ahmed",
            "is_exchange": true
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_exchange_sale_with_incomplete_trade_in_is_validation_error() {
    let state = lazy_state();
    let token = token_for(&state, UserRole::Manager);
    let server = server(state);

    let (name, value) = bearer(&token);
    let response = server
        .post("/api/tractors/1/sell")
        .add_header(name, value)
        .json(&json!({
            "sale_price": 700000,
            "customer_name": "Ahmed",
            "is_exchange": true,
            "exchange_tractor": { "model": "480" }
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("brand"));
}

#[tokio::test]
async fn test_sub_cent_amounts_rejected() {
    let state = lazy_state();
    let token = token_for(&state, UserRole::Manager);
    let server = server(state);

    let (name, value) = bearer(&token);
    let service = server
        .post("/api/services")
        .add_header(name, value)
        .json(&json!({
            "customer_name": "Farm 3",
            "description": "Clutch",
            "labor_cost": 0.005,
            "parts_used": [{ "part_id": 1, "quantity": 1, "unit_price": 0.005 }]
        }))
        .await;
    assert_eq!(service.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(service.json::<Value>()["code"], "VALIDATION_ERROR");

    let (name, value) = bearer(&token);
    let expense = server
        .post("/api/expenses")
        .add_header(name, value)
        .json(&json!({ "category": "bill", "amount": 12.345 }))
        .await;
    assert_eq!(expense.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_positive_expense_rejected() {
    let state = lazy_state();
    let token = token_for(&state, UserRole::Manager);
    let server = server(state);

    let (name, value) = bearer(&token);
    let response = server
        .post("/api/expenses")
        .add_header(name, value)
        .json(&json!({ "category": "rent", "amount": 0 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_part_sale_quantity_must_be_positive() {
    let state = lazy_state();
    let token = token_for(&state, UserRole::Manager);
    let server = server(state);

    let (name, value) = bearer(&token);
    let response = server
        .post("/api/parts/3/sell")
        .add_header(name, value)
        .json(&json!({ "quantity": 0, "customer_name": "Bilal" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_filter_values_rejected() {
    let state = lazy_state();
    let token = token_for(&state, UserRole::Admin);
    let server = server(state);

    for path in [
        "/api/tractors?status=reserved",
        "/api/expenses?category=fuel",
        "/api/reports/transactions?type=refund",
        "/api/reports/transactions?start_date=yesterday",
    ] {
        let (name, value) = bearer(&token);
        let response = server.get(path).add_header(name, value).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", path);
    }
}

#[tokio::test]
async fn test_non_numeric_id_rejected() {
    let state = lazy_state();
    let token = token_for(&state, UserRole::Manager);
    let server = server(state);

    let (name, value) = bearer(&token);
    let response = server.get("/api/tractors/abc").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
