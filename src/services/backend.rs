//! Flower shop backend API client
//!
//! This service wraps the backend REST API consumed by the bot: user
//! registration and per-customer order listings. HTTP client setup,
//! response parsing and error mapping follow one pattern for every call.

use std::time::Duration;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::models::order::OrderRecord;
use crate::utils::errors::{BackendError, FlowerBotError, Result};

/// Registration request payload
#[derive(Debug, Clone, Serialize)]
pub struct TelegramRegisterRequest {
    pub telegram_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

/// Outcome of a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    AlreadyRegistered,
}

#[derive(Debug, Clone, Deserialize)]
struct OrdersResponse {
    orders: Vec<OrderRecord>,
}

/// HTTP client for the flower shop backend
#[derive(Debug, Clone)]
pub struct BackendApi {
    client: Client,
    base_url: String,
}

impl BackendApi {
    /// Create a new BackendApi instance
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.health_timeout_secs))
            .user_agent("FlowerBot/1.0")
            .build()
            .map_err(FlowerBotError::Http)?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Register a Telegram user with the backend.
    ///
    /// A 409 means the user already exists, which callers treat as success.
    pub async fn register_user(&self, request: &TelegramRegisterRequest) -> Result<RegistrationOutcome> {
        let url = format!("{}/api/users/telegram-register", self.base_url);
        debug!(telegram_id = request.telegram_id, url = %url, "Registering user with backend");

        let response = self.client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_request_error)?;

        match response.status() {
            status if status.is_success() => Ok(RegistrationOutcome::Registered),
            StatusCode::CONFLICT => {
                debug!(telegram_id = request.telegram_id, "User already registered");
                Ok(RegistrationOutcome::AlreadyRegistered)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                warn!(telegram_id = request.telegram_id, status = %status, "Registration rejected");
                Err(BackendError::RequestFailed(format!("HTTP {}: {}", status, body)).into())
            }
        }
    }

    /// List a customer's orders
    pub async fn list_orders(&self, telegram_id: i64) -> Result<Vec<OrderRecord>> {
        let url = format!("{}/api/orders/telegram/{}", self.base_url, telegram_id);
        debug!(telegram_id = telegram_id, url = %url, "Fetching orders from backend");

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(map_request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::RequestFailed(format!("HTTP {}: {}", status, body)).into());
        }

        let payload: OrdersResponse = response.json().await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        Ok(payload.orders)
    }
}

fn map_request_error(e: reqwest::Error) -> FlowerBotError {
    if e.is_timeout() {
        BackendError::Timeout.into()
    } else if e.is_connect() {
        BackendError::ServiceUnavailable.into()
    } else {
        BackendError::RequestFailed(e.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let config = BackendConfig {
            api_url: "http://flower-backend:3000/".to_string(),
            ..BackendConfig::default()
        };
        let api = BackendApi::new(&config).unwrap();
        assert_eq!(api.base_url, "http://flower-backend:3000");
    }

    #[test]
    fn test_orders_response_deserialization() {
        let json = r#"{"orders": [{"id": 1, "status_id": 3, "total_amount": 1200.5, "created_at": "2024-01-15"}]}"#;
        let response: OrdersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.orders.len(), 1);
        assert_eq!(response.orders[0].total_amount, 1200.5);
    }

    #[test]
    fn test_register_request_serialization() {
        let request = TelegramRegisterRequest {
            telegram_id: 555,
            first_name: Some("Анна".to_string()),
            last_name: None,
            username: Some("anna".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["telegram_id"], 555);
        assert_eq!(json["username"], "anna");
    }
}
