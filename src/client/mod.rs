//! HTTP client for the durable profile service.
//!
//! A synchronous `ureq` client driven from async contexts via
//! `tokio::task::spawn_blocking` (see [`async_wrapper`]). The client
//! handles authentication, bounded timeouts, and mapping HTTP outcomes
//! onto the store error taxonomy: a 422 is a store rejection, transport
//! failures are "unavailable", and an I/O timeout is "timeout".

mod async_wrapper;
pub use async_wrapper::{AsyncProfileClient, AsyncProfileClientImpl};

use crate::config::Config;
use crate::domain::ProfileKey;
use crate::error::{StoreError, StoreResult};
use crate::metrics::Metrics;
use crate::models::ContactProfile;
use crate::store::{CreateDefaults, MergeFields};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Request body for the profile service's atomic merge endpoint.
///
/// The service applies `set_if_absent` only to fields that are currently
/// empty on the stored record, creating the record from
/// `create_defaults` first when it does not exist. The conditional set
/// happens server-side in one operation, so callers never see a
/// read-then-write window.
#[derive(Debug, Clone, Serialize)]
pub struct MergeRequest {
    pub set_if_absent: MergeFields,
    pub create_defaults: CreateDefaults,
}

/// HTTP client for the profile service.
#[derive(Clone)]
pub struct ProfileApiClient {
    /// Base URL for the profile service
    base_url: String,

    /// API key for authentication
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl ProfileApiClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.api_base_url.clone(),
            config.api_key.clone(),
            config.request_timeout,
        )
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self::build(base_url, api_key, 10)
    }

    fn build(base_url: String, api_key: String, timeout_secs: u64) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn profile_path(&self, key: &ProfileKey) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{}/profiles/{}/{}", base, key.team_id(), key.user_id())
    }

    /// Fetch a profile by key. A 404 from the service means the profile
    /// does not exist yet and is not an error.
    pub fn fetch_profile(&self, key: &ProfileKey) -> StoreResult<Option<ContactProfile>> {
        let url = self.profile_path(key);
        let start = Instant::now();

        let result = self
            .agent
            .get(&url)
            .set("x-intake-api-key", &self.api_key)
            .set("Content-Type", "application/json")
            .call();

        self.metrics.record_http_request(start.elapsed());

        match result {
            Ok(response) => {
                let body = response
                    .into_string()
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;
                let profile: ContactProfile = serde_json::from_str(&body)?;
                Ok(Some(profile))
            }
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(e) => {
                self.metrics.record_http_error();
                Err(map_error(e))
            }
        }
    }

    /// Apply an atomic fill-missing merge and return the stored record.
    pub fn merge_profile(
        &self,
        key: &ProfileKey,
        request: &MergeRequest,
    ) -> StoreResult<ContactProfile> {
        let url = format!("{}/merge", self.profile_path(key));
        let body = serde_json::to_value(request)?;
        let start = Instant::now();

        tracing::debug!(%key, "POST {}", url);

        let result = self
            .agent
            .post(&url)
            .set("x-intake-api-key", &self.api_key)
            .set("Content-Type", "application/json")
            .send_json(&body);

        self.metrics.record_http_request(start.elapsed());

        match result {
            Ok(response) => {
                let body = response
                    .into_string()
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;
                let profile: ContactProfile = serde_json::from_str(&body)?;
                Ok(profile)
            }
            Err(e) => {
                self.metrics.record_http_error();
                Err(map_error(e))
            }
        }
    }
}

/// Map a ureq error to a StoreError.
fn map_error(error: ureq::Error) -> StoreError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());

            match code {
                401 => StoreError::Unauthorized,
                422 => StoreError::Rejected { reason: message },
                _ => StoreError::Backend {
                    status: code,
                    message,
                },
            }
        }
        ureq::Error::Transport(transport) => {
            if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                StoreError::Unavailable("Connection failed".to_string())
            } else if transport.kind() == ureq::ErrorKind::Io {
                StoreError::Timeout
            } else {
                StoreError::Unavailable(transport.to_string())
            }
        }
    }
}
