//! In-process profile store.
//!
//! Used when no durable backend is configured: profiles survive for the
//! process lifetime only. The whole merge runs under one lock, so the
//! fill-missing semantics hold even under concurrent merges for the
//! same key.

use crate::domain::{PhoneNumber, ProfileKey};
use crate::error::{StoreError, StoreResult};
use crate::models::{ContactProfile, ProfileStatus};
use crate::store::traits::{CreateDefaults, MergeFields, ProfileStore};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

/// Ephemeral in-memory implementation of [`ProfileStore`].
#[derive(Default)]
pub struct MemoryStore {
    profiles: Mutex<HashMap<ProfileKey, ContactProfile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        tracing::info!("using in-memory profile store; contact data is not durable");
        Self::default()
    }

    /// Number of profiles currently held.
    pub fn len(&self) -> usize {
        self.profiles.lock().expect("profile map lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store-side constraint, stricter than the lenient format validator:
    /// a persisted phone must be in canonical `DDD-DDD-DDDD` form.
    fn check_constraints(fields: &MergeFields) -> StoreResult<()> {
        if let Some(phone) = &fields.phone {
            let parsed = PhoneNumber::new(phone.clone()).map_err(|e| StoreError::Rejected {
                reason: e.to_string(),
            })?;
            if !parsed.is_canonical() {
                return Err(StoreError::Rejected {
                    reason: format!(
                        "{} is not a valid phone number format. Required format: DDD-DDD-DDDD",
                        phone
                    ),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn fetch(&self, key: &ProfileKey) -> StoreResult<Option<ContactProfile>> {
        let profiles = self.profiles.lock().expect("profile map lock poisoned");
        Ok(profiles.get(key).cloned())
    }

    async fn upsert_merge(
        &self,
        key: &ProfileKey,
        fields: MergeFields,
        defaults: CreateDefaults,
    ) -> StoreResult<ContactProfile> {
        Self::check_constraints(&fields)?;

        let mut profiles = self.profiles.lock().expect("profile map lock poisoned");
        let now = Utc::now();

        let profile = profiles
            .entry(key.clone())
            .and_modify(|existing| {
                let mut touched = false;
                if let Some(email) = &fields.email {
                    if existing.email_missing() {
                        existing.email = Some(email.clone());
                        touched = true;
                    }
                }
                if let Some(phone) = &fields.phone {
                    if existing.phone_missing() {
                        existing.phone = Some(phone.clone());
                        touched = true;
                    }
                }
                if touched {
                    existing.updated_at = now;
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
