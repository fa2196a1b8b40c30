//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the FlowerBot application.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard owns the background writer for the rolling log
/// file; the caller must hold it for the process lifetime or file output
/// stops.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "flowerbot.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log staff channel relay events
pub fn log_staff_relay(customer_id: i64, direction: &str, delivered: bool) {
    if delivered {
        info!(
            customer_id = customer_id,
            direction = direction,
            "Staff relay delivered"
        );
    } else {
        warn!(
            customer_id = customer_id,
            direction = direction,
            "Staff relay failed"
        );
    }
}
