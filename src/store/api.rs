//! Durable profile store backed by the HTTP profile service.

use crate::client::{AsyncProfileClient, MergeRequest};
use crate::domain::ProfileKey;
use crate::error::StoreResult;
use crate::models::ContactProfile;
use crate::store::traits::{CreateDefaults, MergeFields, ProfileStore};
use async_trait::async_trait;
use std::sync::Arc;

/// [`ProfileStore`] implementation over the profile service.
///
/// Per-key atomicity is provided by the service's merge endpoint: the
/// conditional field-set runs server-side in one operation, so this
/// adapter is a thin translation layer.
pub struct ApiStore {
    client: Arc<dyn AsyncProfileClient>,
}

impl ApiStore {
    pub fn new(client: Arc<dyn AsyncProfileClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileStore for ApiStore {
    async fn fetch(&self, key: &ProfileKey) -> StoreResult<Option<ContactProfile>> {
        self.client.fetch_profile(key).await
    }

    async fn upsert_merge(
        &self,
        key: &ProfileKey,
        fields: MergeFields,
        defaults: CreateDefaults,
    ) -> StoreResult<ContactProfile> {
        let request = MergeRequest {
            set_if_absent: fields,
            create_defaults: defaults,
        };
        self.client.merge_profile(key, request).await
    }
}
