//! ProfileKey value object.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The durable identity of a contact profile: one profile exists per
/// `(team_id, user_id)` pair.
///
/// Both components are validated non-empty at construction time, which
/// keeps the store adapters free of key sanity checks.
///
/// # Example
///
/// ```
/// use contact_intake::domain::ProfileKey;
///
/// let key = ProfileKey::new("T123", "U456").unwrap();
/// assert_eq!(key.team_id(), "T123");
/// assert_eq!(key.user_id(), "U456");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileKey {
    team_id: String,
    user_id: String,
}

impl ProfileKey {
    /// Create a new ProfileKey, validating that neither component is empty.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyKey` if either id is empty.
    pub fn new(team_id: impl Into<String>, user_id: impl Into<String>) -> Result<Self, ValidationError> {
        let team_id = team_id.into();
        let user_id = user_id.into();

        if team_id.trim().is_empty() || user_id.trim().is_empty() {
            return Err(ValidationError::EmptyKey);
        }

        Ok(Self { team_id, user_id })
    }

    /// The team (workspace) identifier.
    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    /// The user identifier within the team.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.team_id, self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_valid() {
        let key = ProfileKey::new("T1", "U1").unwrap();
        assert_eq!(key.team_id(), "T1");
        assert_eq!(key.user_id(), "U1");
    }

    #[test]
    fn test_key_rejects_empty_components() {
        assert!(ProfileKey::new("", "U1").is_err());
        assert!(ProfileKey::new("T1", "").is_err());
        assert!(ProfileKey::new("  ", "U1").is_err());
    }

    #[test]
    fn test_key_display() {
        let key = ProfileKey::new("T1", "U1").unwrap();
        assert_eq!(format!("{}", key), "T1/U1");
    }

    #[test]
    fn test_key_equality_drives_uniqueness() {
        let a = ProfileKey::new("T1", "U1").unwrap();
        let b = ProfileKey::new("T1", "U1").unwrap();
        let c = ProfileKey::new("T2", "U1").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
