//! Backend availability probe
//!
//! Caches the result of the backend health check so a burst of inbound
//! messages issues at most one probe per interval. The cache timestamp is
//! advanced after every completed attempt, success or failure, to keep the
//! interval floor during outages as well.

use std::sync::Arc;
use std::time::{Duration, Instant};
use reqwest::Client;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::BackendConfig;
use crate::utils::errors::{FlowerBotError, Result};

#[derive(Debug)]
struct ProbeState {
    available: bool,
    last_check: Option<Instant>,
    checking: bool,
}

/// Cached health check against the backend API
#[derive(Debug)]
pub struct AvailabilityProbe {
    client: Client,
    health_url: String,
    check_interval: Duration,
    state: Mutex<ProbeState>,
}

impl AvailabilityProbe {
    /// Create a new probe; no request is made until the first `check`
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.health_timeout_secs))
            .user_agent("FlowerBot/1.0")
            .build()
            .map_err(FlowerBotError::Http)?;

        Ok(Self {
            client,
            health_url: format!("{}/health", config.api_url.trim_end_matches('/')),
            check_interval: Duration::from_secs(config.check_interval_secs),
            state: Mutex::new(ProbeState {
                available: false,
                last_check: None,
                checking: false,
            }),
        })
    }

    /// Current backend availability.
    ///
    /// Returns the cached value when the cache is fresh or another check is
    /// already in flight; otherwise performs one bounded health request.
    /// Any failure counts as unavailable. The lock is released before the
    /// request and reacquired to publish the result.
    pub async fn check(&self) -> bool {
        {
            let mut state = self.state.lock().await;
            if state.checking {
                return state.available;
            }
            if let Some(last) = state.last_check {
                if last.elapsed() < self.check_interval {
                    return state.available;
                }
            }
            state.checking = true;
        }

        let available = match self.client.get(&self.health_url).send().await {
            Ok(response) => {
                let ok = response.status().is_success();
                if !ok {
                    warn!(status = %response.status(), "Backend health check returned non-success status");
                }
                ok
            }
            Err(e) => {
                warn!(error = %e, "Backend health check failed");
                false
            }
        };

        let mut state = self.state.lock().await;
        state.available = available;
        state.checking = false;
        state.last_check = Some(Instant::now());
        debug!(available = available, "Backend availability updated");

        available
    }

    /// Spawn a periodic refresh independent of request traffic.
    ///
    /// The in-flight flag keeps the timer from overlapping a check already
    /// triggered by a handler. The returned handle is aborted on shutdown.
    pub fn spawn_refresh(self: Arc<Self>) -> JoinHandle<()> {
        let interval = self.check_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let available = self.check().await;
                if !available {
                    info!("Periodic check: backend services unavailable");
                }
            }
        })
    }
}
