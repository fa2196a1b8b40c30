//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{FlowerBotError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_backend_config(&settings.backend)?;
    validate_logging_config(&settings.logging)?;
    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(FlowerBotError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.staff_chat_id == 0 {
        return Err(FlowerBotError::Config(
            "Staff chat id is required".to_string()
        ));
    }

    url::Url::parse(&config.webapp_url).map_err(|e| {
        FlowerBotError::Config(format!("Invalid webapp URL: {}", e))
    })?;

    Ok(())
}

/// Validate backend API configuration
fn validate_backend_config(config: &super::BackendConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(FlowerBotError::Config(
            "Backend API URL is required".to_string()
        ));
    }

    url::Url::parse(&config.api_url).map_err(|e| {
        FlowerBotError::Config(format!("Invalid backend API URL: {}", e))
    })?;

    if config.check_interval_secs == 0 {
        return Err(FlowerBotError::Config(
            "Availability check interval must be greater than 0".to_string()
        ));
    }

    if config.health_timeout_secs == 0 {
        return Err(FlowerBotError::Config(
            "Health check timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(FlowerBotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(FlowerBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
