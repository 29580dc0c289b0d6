//! Profile store adapter interface.

use crate::domain::ProfileKey;
use crate::error::StoreResult;
use crate::models::ContactProfile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The validated fields a merge wants to set where currently absent.
///
/// Fields already populated in the stored record are left untouched even
/// when a new extraction disagrees with the old value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl MergeFields {
    /// Whether there is anything to write.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none()
    }
}

/// Defaults used only when the upsert creates a brand-new profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDefaults {
    /// Display name from the messaging platform.
    pub name: String,

    /// Channel the conversation happened in.
    pub channel: String,
}

/// Narrow interface over a durable keyed record store.
///
/// `upsert_merge` must be atomic per key: implementations may not expose
/// a read-then-write window to callers. Concurrent merges for different
/// keys proceed independently with no coordination.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Read a profile by key. `Ok(None)` means no profile exists yet.
    async fn fetch(&self, key: &ProfileKey) -> StoreResult<Option<ContactProfile>>;

    /// Atomic fill-missing upsert.
    ///
    /// When no profile exists for `key`, one is created in status `new`
    /// from `defaults` plus whichever `fields` are present. When one
    /// exists, each field in `fields` is written only if the stored slot
    /// is currently null or empty. Returns the resulting stored record.
    async fn upsert_merge(
        &self,
        key: &ProfileKey,
        fields: MergeFields,
        defaults: CreateDefaults,
    ) -> StoreResult<ContactProfile>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_fields_is_empty() {
        assert!(MergeFields::default().is_empty());
        assert!(!MergeFields {
            email: Some("a@b.co".to_string()),
            phone: None,
        }
        .is_empty());
    }

    #[test]
    fn test_merge_fields_serialization_skips_absent() {
        let fields = MergeFields {
            email: Some("a@b.co".to_string()),
            phone: None,
        };
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"email":"a@b.co"}"#);
    }
}
