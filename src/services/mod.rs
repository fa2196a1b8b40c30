//! Services module
//!
//! This module contains the outward-facing service layer: the backend API
//! client, the cached availability probe, and outbound notifications.

pub mod availability;
pub mod backend;
pub mod notification;

// Re-export commonly used services
pub use availability::AvailabilityProbe;
pub use backend::{BackendApi, RegistrationOutcome, TelegramRegisterRequest};
pub use notification::NotificationService;

use std::sync::Arc;
use teloxide::Bot;

use crate::config::settings::Settings;
use crate::state::ReplyLinkStore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub backend: BackendApi,
    pub availability: Arc<AvailabilityProbe>,
    pub notifications: NotificationService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(bot: Bot, settings: Settings, reply_links: ReplyLinkStore) -> Result<Self> {
        let backend = BackendApi::new(&settings.backend)?;
        let availability = Arc::new(AvailabilityProbe::new(&settings.backend)?);
        let notifications = NotificationService::new(bot, settings, reply_links);

        Ok(Self {
            backend,
            availability,
            notifications,
        })
    }
}
