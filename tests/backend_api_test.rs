//! Integration tests for the backend API client against a mock server

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use FlowerBot::config::BackendConfig;
use FlowerBot::services::backend::{BackendApi, RegistrationOutcome, TelegramRegisterRequest};
use FlowerBot::utils::errors::{BackendError, FlowerBotError};

fn test_config(api_url: String) -> BackendConfig {
    BackendConfig {
        api_url,
        check_interval_secs: 30,
        health_timeout_secs: 5,
    }
}

fn register_request(telegram_id: i64) -> TelegramRegisterRequest {
    TelegramRegisterRequest {
        telegram_id,
        first_name: Some("Анна".to_string()),
        last_name: None,
        username: Some("anna".to_string()),
    }
}

#[tokio::test]
async fn test_register_user_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/telegram-register"))
        .and(body_partial_json(json!({"telegram_id": 555})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let api = BackendApi::new(&test_config(server.uri())).unwrap();
    let outcome = api.register_user(&register_request(555)).await.unwrap();

    assert_eq!(outcome, RegistrationOutcome::Registered);
}

#[tokio::test]
async fn test_register_user_conflict_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/telegram-register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "user already exists"
        })))
        .mount(&server)
        .await;

    let api = BackendApi::new(&test_config(server.uri())).unwrap();
    let outcome = api.register_user(&register_request(555)).await.unwrap();

    assert_eq!(outcome, RegistrationOutcome::AlreadyRegistered);
}

#[tokio::test]
async fn test_register_user_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/telegram-register"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = BackendApi::new(&test_config(server.uri())).unwrap();
    let result = api.register_user(&register_request(555)).await;

    assert_matches!(
        result,
        Err(FlowerBotError::Backend(BackendError::RequestFailed(_)))
    );
}

#[tokio::test]
async fn test_list_orders_parses_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/telegram/777"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [
                {"id": 10, "status_id": 1, "total_amount": 2500.0, "created_at": "2024-01-15"},
                {"id": 11, "status_id": 3, "total_amount": 900.5, "created_at": "2024-02-20"}
            ]
        })))
        .mount(&server)
        .await;

    let api = BackendApi::new(&test_config(server.uri())).unwrap();
    let orders = api.list_orders(777).await.unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, 10);
    assert_eq!(orders[1].total_amount, 900.5);
}

#[tokio::test]
async fn test_list_orders_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/telegram/777"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"orders": []})))
        .mount(&server)
        .await;

    let api = BackendApi::new(&test_config(server.uri())).unwrap();
    let orders = api.list_orders(777).await.unwrap();

    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_list_orders_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/telegram/777"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let api = BackendApi::new(&test_config(server.uri())).unwrap();
    let result = api.list_orders(777).await;

    assert_matches!(
        result,
        Err(FlowerBotError::Backend(BackendError::InvalidResponse(_)))
    );
}

#[tokio::test]
async fn test_unreachable_backend_maps_to_service_unavailable() {
    // Port from a server that is immediately shut down. An exclusive
    // (non-pooled) server is required: pooled servers keep listening
    // after drop and would answer 404 instead of refusing connections.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let api = BackendApi::new(&test_config(uri)).unwrap();
    let result = api.list_orders(777).await;

    assert_matches!(
        result,
        Err(FlowerBotError::Backend(
            BackendError::ServiceUnavailable | BackendError::Timeout
        ))
    );
}
