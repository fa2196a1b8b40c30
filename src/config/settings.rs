//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// Chat where staff receive order notifications and customer escalations
    pub staff_chat_id: i64,
    #[serde(default = "default_webapp_url")]
    pub webapp_url: String,
}

/// Flower shop backend API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Availability cache interval, floor between two health probes
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,
    #[serde(default = "default_health_timeout")]
    pub health_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

fn default_webapp_url() -> String {
    "https://ra.nov.ru".to_string()
}

fn default_api_url() -> String {
    "http://flower-backend:3000".to_string()
}

fn default_check_interval() -> u64 {
    30
}

fn default_health_timeout() -> u64 {
    5
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("FLOWERBOT").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::FlowerBotError> {
        super::validation::validate_settings(self)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            check_interval_secs: default_check_interval(),
            health_timeout_secs: default_health_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: "./logs".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_defaults() {
        let backend = BackendConfig::default();
        assert_eq!(backend.check_interval_secs, 30);
        assert_eq!(backend.health_timeout_secs, 5);
        assert_eq!(backend.api_url, "http://flower-backend:3000");
    }

    #[test]
    fn test_settings_deserialization_with_defaults() {
        let toml = r#"
            [bot]
            token = "123:abc"
            staff_chat_id = -100500
        "#;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.bot.staff_chat_id, -100500);
        assert_eq!(settings.bot.webapp_url, "https://ra.nov.ru");
        assert_eq!(settings.backend.check_interval_secs, 30);
        assert_eq!(settings.logging.level, "info");
    }
}
