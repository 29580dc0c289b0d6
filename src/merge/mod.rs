//! Merge coordination.
//!
//! The coordinator exclusively owns the write path into the profile
//! store: it gates extractor candidates through the domain validators,
//! applies at most one durable write per message, and verifies the
//! result. Nothing in here is allowed to abort the caller's
//! conversation turn; every failure degrades to "no contact info
//! captured this turn" plus a log event.

use crate::domain::{EmailAddress, PhoneNumber, ProfileKey};
use crate::error::StoreError;
use crate::extract::ContactCandidate;
use crate::metrics::Metrics;
use crate::models::ContactProfile;
use crate::store::{CreateDefaults, MergeFields, ProfileStore};
use std::sync::Arc;
use std::time::Duration;

/// Where a message came from; everything the coordinator needs to create
/// a profile on first contact.
#[derive(Debug, Clone)]
pub struct MessageContext {
    pub key: ProfileKey,
    pub display_name: String,
    pub channel: String,
}

/// What happened to a candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// Nothing to write: no candidate fields, or none survived validation.
    Skipped,
    /// The merge was durably applied; the stored record is returned.
    Saved(ContactProfile),
    /// The store rejected the write or stayed unavailable through the
    /// retry budget. The conversation continues unaffected.
    Failed,
}

/// Orchestrates validation, the single upsert, and read-back
/// verification for each extracted candidate.
pub struct MergeCoordinator {
    store: Arc<dyn ProfileStore>,
    metrics: Metrics,
    retry_attempts: u32,
}

impl MergeCoordinator {
    /// `retry_attempts` bounds the transient-failure retry loop; it must
    /// be at least 1 (enforced by config validation).
    pub fn new(store: Arc<dyn ProfileStore>, metrics: Metrics, retry_attempts: u32) -> Self {
        Self {
            store,
            metrics,
            retry_attempts: retry_attempts.max(1),
        }
    }

    /// Automatic path: merge a candidate extracted from free-form chat.
    ///
    /// Format-invalid candidate fields are dropped silently (the user is
    /// never told their info "looks wrong" mid-chat); store failures are
    /// logged and swallowed.
    pub async fn record_candidate(
        &self,
        ctx: &MessageContext,
        candidate: &ContactCandidate,
    ) -> MergeOutcome {
        if !candidate.has_contact_info {
            return MergeOutcome::Skipped;
        }

        let fields = self.validated_fields(candidate);
        if fields.is_empty() {
            tracing::debug!(key = %ctx.key, "no candidate field survived validation");
            return MergeOutcome::Skipped;
        }

        let defaults = CreateDefaults {
            name: ctx.display_name.clone(),
            channel: ctx.channel.clone(),
        };

        match self.upsert_with_retry(&ctx.key, fields.clone(), defaults).await {
            Ok(profile) => {
                self.verify_readback(&ctx.key, &fields, &profile);
                self.metrics.record_merge_saved();
                tracing::info!(
                    key = %ctx.key,
                    email = fields.email.is_some(),
                    phone = fields.phone.is_some(),
                    "contact info merged"
                );
                MergeOutcome::Saved(profile)
            }
            Err(StoreError::Rejected { reason }) => {
                self.metrics.record_merge_rejected();
                tracing::error!(
                    key = %ctx.key,
                    email = ?fields.email,
                    phone = ?fields.phone,
                    %reason,
                    "store rejected contact info; not saved this turn"
                );
                MergeOutcome::Failed
            }
            Err(e) => {
                self.metrics.record_merge_failed();
                tracing::error!(
                    key = %ctx.key,
                    error = %e,
                    "contact info not saved this turn; will retry on next message"
                );
                MergeOutcome::Failed
            }
        }
    }

    /// Explicit path: a form submission with both fields required.
    ///
    /// Unlike the chat path, validation errors ARE surfaced to the user,
    /// as a list of human-readable messages to render with a resubmit
    /// prompt. Reduces to the same store primitive as the chat path.
    pub async fn submit_form(
        &self,
        ctx: &MessageContext,
        email: &str,
        phone: &str,
    ) -> Result<ContactProfile, Vec<String>> {
        let mut errors = Vec::new();

        let email = match EmailAddress::new(email) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.push("Please provide a valid email address".to_string());
                None
            }
        };

        let phone = match PhoneNumber::new(phone) {
            Ok(phone) => Some(phone.canonicalize()),
            Err(_) => {
                errors.push("Please provide a valid phone number".to_string());
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let fields = MergeFields {
            email: email.map(EmailAddress::into_inner),
            phone: phone.map(PhoneNumber::into_inner),
        };
        let defaults = CreateDefaults {
            name: ctx.display_name.clone(),
            channel: ctx.channel.clone(),
        };

        match self.upsert_with_retry(&ctx.key, fields.clone(), defaults).await {
            Ok(profile) => {
                self.verify_readback(&ctx.key, &fields, &profile);
                self.metrics.record_merge_saved();
                tracing::info!(key = %ctx.key, "contact form submission saved");
                Ok(profile)
            }
            Err(e) => {
                if matches!(e, StoreError::Rejected { .. }) {
                    self.metrics.record_merge_rejected();
                } else {
                    self.metrics.record_merge_failed();
                }
                tracing::error!(key = %ctx.key, error = %e, "form submission not saved");
                Err(vec![
                    "There was an error saving your information. Please try again later."
                        .to_string(),
                ])
            }
        }
    }

    /// Gate candidate fields through the lenient format validators.
    fn validated_fields(&self, candidate: &ContactCandidate) -> MergeFields {
        let email = candidate
            .email
            .as_deref()
            .filter(|e| {
                let ok = EmailAddress::is_valid(e);
                if !ok {
                    tracing::debug!(email = %e, "dropping format-invalid email candidate");
                }
                ok
            })
            .map(str::to_string);

        let phone = candidate
            .phone
            .as_deref()
            .filter(|p| {
                let ok = PhoneNumber::is_valid(p);
                if !ok {
                    tracing::debug!(phone = %p, "dropping format-invalid phone candidate");
                }
                ok
            })
            .map(str::to_string);

        MergeFields { email, phone }
    }

    /// One durable write, retried only on transient failures and only up
    /// to the configured bound. Rejections are terminal.
    async fn upsert_with_retry(
        &self,
        key: &ProfileKey,
        fields: MergeFields,
        defaults: CreateDefaults,
    ) -> Result<ContactProfile, StoreError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self
                .store
                .upsert_merge(key, fields.clone(), defaults.clone())
                .await
            {
                Ok(profile) => return Ok(profile),
                Err(e) if e.is_transient() && attempt < self.retry_attempts => {
                    tracing::warn!(
                        %key,
                        attempt,
                        error = %e,
                        "transient store failure; retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(100 * u64::from(attempt))).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Compare what was requested against what the store now holds.
    ///
    /// A requested field whose stored slot ends up *empty* indicates a
    /// race or a silent store-level drop; that is a merge-consistency
    /// anomaly, reported but never raised. A stored slot holding a
    /// *different* non-empty value is the fill-missing invariant working
    /// as intended.
    fn verify_readback(&self, key: &ProfileKey, requested: &MergeFields, stored: &ContactProfile) {
        let email_anomaly = requested.email.is_some() && stored.email_missing();
        let phone_anomaly = requested.phone.is_some() && stored.phone_missing();

        if email_anomaly || phone_anomaly {
            self.metrics.record_merge_anomaly();
            tracing::warn!(
                %key,
                email_anomaly,
                phone_anomaly,
                "merge anomaly: requested field missing from stored record"
            );
        }

        if let (Some(requested_email), Some(stored_email)) =
            (requested.email.as_deref(), stored.email.as_deref())
        {
            if requested_email != stored_email {
                tracing::debug!(%key, "email already populated; existing value kept");
            }
        }
        if let (Some(requested_phone), Some(stored_phone)) =
            (requested.phone.as_deref(), stored.phone.as_deref())
        {
            if requested_phone != stored_phone {
                tracing::debug!(%key, "phone already populated; existing value kept");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::process_message;
    use crate::store::MemoryStore;

    fn coordinator() -> MergeCoordinator {
        MergeCoordinator::new(Arc::new(MemoryStore::default()), Metrics::new(), 3)
    }

    fn ctx() -> MessageContext {
        MessageContext {
            key: ProfileKey::new("T1", "U1").unwrap(),
            display_name: "Ada Lovelace".to_string(),
            channel: "C1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_candidate_skips_store() {
        let coordinator = coordinator();
        let outcome = coordinator
            .record_candidate(&ctx(), &ContactCandidate::empty())
            .await;
        assert_eq!(outcome, MergeOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_extracted_message_lands_in_store() {
        let coordinator = coordinator();
        let candidate = process_message("my email is ada@example.com");

        let outcome = coordinator.record_candidate(&ctx(), &candidate).await;
        match outcome {
            MergeOutcome::Saved(profile) => {
                assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
                assert_eq!(profile.name, "Ada Lovelace");
            }
            other => panic!("expected Saved, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_form_validation_errors_are_human_readable() {
        let coordinator = coordinator();
        let errors = coordinator
            .submit_form(&ctx(), "not-an-email", "123")
            .await
            .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("valid email"));
        assert!(errors[1].contains("valid phone"));
    }

    #[tokio::test]
    async fn test_form_canonicalizes_phone() {
        let coordinator = coordinator();
        let profile = coordinator
            .submit_form(&ctx(), "ada@example.com", "(555) 123-4567")
            .await
            .unwrap();

        assert_eq!(profile.phone.as_deref(), Some("555-123-4567"));
    }
}
