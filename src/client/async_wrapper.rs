//! Async wrapper around the synchronous profile client.
//!
//! Runs HTTP operations on the blocking thread pool via
//! `tokio::task::spawn_blocking` so the async runtime is never blocked
//! by a store call.

use crate::client::{MergeRequest, ProfileApiClient};
use crate::domain::ProfileKey;
use crate::error::{StoreError, StoreResult};
use crate::models::ContactProfile;
use async_trait::async_trait;
use std::sync::Arc;

/// Async facade over the profile service operations.
#[async_trait]
pub trait AsyncProfileClient: Send + Sync {
    async fn fetch_profile(&self, key: &ProfileKey) -> StoreResult<Option<ContactProfile>>;

    async fn merge_profile(
        &self,
        key: &ProfileKey,
        request: MergeRequest,
    ) -> StoreResult<ContactProfile>;
}

/// Default implementation wrapping [`ProfileApiClient`].
#[derive(Clone)]
pub struct AsyncProfileClientImpl {
    client: Arc<ProfileApiClient>,
}

impl AsyncProfileClientImpl {
    pub fn new(client: ProfileApiClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncProfileClient for AsyncProfileClientImpl {
    async fn fetch_profile(&self, key: &ProfileKey) -> StoreResult<Option<ContactProfile>> {
        let client = self.client.clone();
        let key = key.clone();

        tokio::task::spawn_blocking(move || client.fetch_profile(&key))
            .await
            .map_err(|e| StoreError::Unavailable(format!("Task join error: {}", e)))?
    }

    async fn merge_profile(
        &self,
        key: &ProfileKey,
        request: MergeRequest,
    ) -> StoreResult<ContactProfile> {
        let client = self.client.clone();
        let key = key.clone();

        tokio::task::spawn_blocking(move || client.merge_profile(&key, &request))
            .await
            .map_err(|e| StoreError::Unavailable(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_async_client_creation() {
        let client =
            ProfileApiClient::with_base_url("https://api.test".to_string(), "key".to_string());
        let async_client = AsyncProfileClientImpl::new(client);

        // Should be able to clone
        let _cloned = async_client.clone();
    }
}
