use async_trait::async_trait;
use chrono::Utc;
use contact_intake::domain::ProfileKey;
use contact_intake::error::{StoreError, StoreResult};
use contact_intake::models::{ContactProfile, ProfileStatus};
use contact_intake::store::{CreateDefaults, MergeFields, ProfileStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Failures the mock can be primed to return, in order, before
/// behaving normally again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum FailureMode {
    Unavailable,
    Timeout,
    Rejected,
}

impl FailureMode {
    fn into_error(self) -> StoreError {
        match self {
            FailureMode::Unavailable => {
                StoreError::Unavailable("injected connection failure".to_string())
            }
            FailureMode::Timeout => StoreError::Timeout,
            FailureMode::Rejected => StoreError::Rejected {
                reason: "injected constraint violation".to_string(),
            },
        }
    }
}

/// Mock profile store for coordinator tests.
///
/// Implements the same fill-missing merge as the real adapters, tracks
/// method call counts, and can be primed with a queue of failures to
/// exercise the retry and degradation paths.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockProfileStore {
    profiles: Arc<Mutex<HashMap<ProfileKey, ContactProfile>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failure_queue: Arc<Mutex<Vec<FailureMode>>>,
    drop_requested_fields: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue failures to be returned by the next upsert calls, oldest
    /// first.
    pub fn inject_failures(&self, failures: &[FailureMode]) {
        let mut queue = self.failure_queue.lock().unwrap();
        queue.extend_from_slice(failures);
    }

    /// Make subsequent upserts succeed without applying any requested
    /// field, simulating a backend that silently drops the write.
    pub fn silently_drop_fields(&self) {
        *self.drop_requested_fields.lock().unwrap() = true;
    }

    /// Get the number of times a method was called.
    pub fn call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Read a profile directly, bypassing call tracking.
    pub fn profile(&self, key: &ProfileKey) -> Option<ContactProfile> {
        self.profiles.lock().unwrap().get(key).cloned()
    }

    /// Seed a profile directly, bypassing the merge semantics.
    pub fn seed(&self, profile: ContactProfile) {
        let key = profile.key();
        self.profiles.lock().unwrap().insert(key, profile);
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn next_failure(&self) -> Option<StoreError> {
        let mut queue = self.failure_queue.lock().unwrap();
        if queue.is_empty() {
            None
        } else {
            Some(queue.remove(0).into_error())
        }
    }
}

#[async_trait]
impl ProfileStore for MockProfileStore {
    async fn fetch(&self, key: &ProfileKey) -> StoreResult<Option<ContactProfile>> {
        self.track_call("fetch");
        Ok(self.profiles.lock().unwrap().get(key).cloned())
    }

    async fn upsert_merge(
        &self,
        key: &ProfileKey,
        fields: MergeFields,
        defaults: CreateDefaults,
    ) -> StoreResult<ContactProfile> {
        self.track_call("upsert_merge");

        if let Some(error) = self.next_failure() {
            return Err(error);
        }

        let mut profiles = self.profiles.lock().unwrap();
        let now = Utc::now();

        if *self.drop_requested_fields.lock().unwrap() {
            let profile = profiles.entry(key.clone()).or_insert_with(|| ContactProfile {
                team_id: key.team_id().to_string(),
                user_id: key.user_id().to_string(),
                name: defaults.name.clone(),
                email: None,
                phone: None,
                channel: defaults.channel.clone(),
                status: ProfileStatus::New,
                created_at: now,
                updated_at: now,
            });
            return Ok(profile.clone());
        }

        let profile = profiles
            .entry(key.clone())
            .and_modify(|existing| {
                if let Some(email) = &fields.email {
                    if existing.email_missing() {
                        existing.email = Some(email.clone());
                        existing.updated_at = now;
                    }
                }
                if let Some(phone) = &fields.phone {
                    if existing.phone_missing() {
                        existing.phone = Some(phone.clone());
                        existing.updated_at = now;
                    }
                }
            })
            .or_insert_with(|| ContactProfile {
                team_id: key.team_id().to_string(),
                user_id: key.user_id().to_string(),
                name: defaults.name.clone(),
                email: fields.email.clone(),
                phone: fields.phone.clone(),
                channel: defaults.channel.clone(),
                status: ProfileStatus::New,
                created_at: now,
                updated_at: now,
            });

        Ok(profile.clone())
    }
}
