//! Durable contact profile model.

use crate::domain::ProfileKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outreach lifecycle of a profile.
///
/// Monotonic `new -> contacted -> replied -> completed`. This core only
/// ever creates profiles in `New`; advancing the status is an external
/// workflow concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    #[default]
    New,
    Contacted,
    Replied,
    Completed,
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProfileStatus::New => "new",
            ProfileStatus::Contacted => "contacted",
            ProfileStatus::Replied => "replied",
            ProfileStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

/// A durable contact profile, one per `(team, user)` pair.
///
/// Invariant: once `email` or `phone` holds a valid value it is never
/// overwritten by a later extraction; the merge path only fills fields
/// that are currently absent. Profiles are mutated exclusively through
/// the merge coordinator (automatic path) or form submission (explicit
/// path), both of which reduce to the same store primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactProfile {
    /// Team identifier; half of the uniqueness key.
    pub team_id: String,

    /// User identifier; the other half of the uniqueness key.
    pub user_id: String,

    /// Display name captured from the messaging platform.
    pub name: String,

    /// Email address, once captured. Never forced to lower case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number in the canonical `DDD-DDD-DDDD` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Channel the conversation happened in.
    pub channel: String,

    /// Outreach status; always `New` when created by this core.
    #[serde(default)]
    pub status: ProfileStatus,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ContactProfile {
    /// The profile's uniqueness key.
    pub fn key(&self) -> ProfileKey {
        // Stored profiles were created through a validated key
        ProfileKey::new(self.team_id.clone(), self.user_id.clone())
            .expect("stored profile has non-empty key components")
    }

    /// Whether a field slot is still open for a fill-missing merge.
    /// Empty strings count as absent, matching what older records may hold.
    pub fn email_missing(&self) -> bool {
        self.email.as_deref().map_or(true, |e| e.trim().is_empty())
    }

    /// See [`ContactProfile::email_missing`].
    pub fn phone_missing(&self) -> bool {
        self.phone.as_deref().map_or(true, |p| p.trim().is_empty())
    }
}
