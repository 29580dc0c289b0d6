//! PhoneNumber value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A type-safe wrapper for phone numbers.
///
/// Validation is deliberately lenient: after stripping formatting, the
/// digit count must land in [7, 15]. This asserts format plausibility,
/// not deliverability; international numbers are accepted without
/// country-specific rules.
///
/// The canonical persisted shape for 10-digit numbers is `DDD-DDD-DDDD`,
/// used end-to-end by the pipeline.
///
/// # Example
///
/// ```
/// use contact_intake::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("+1 (555) 123-4567").unwrap();
/// assert_eq!(phone.digits_only(), "15551234567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if fewer than 7 or more
    /// than 15 digits remain after stripping formatting.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into();
        let trimmed = phone.trim();

        if !Self::is_valid(trimmed) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Validate phone format: digit count in [7, 15] after stripping
    /// non-digits. Empty input is `false`, never an error.
    pub fn is_valid(phone: &str) -> bool {
        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        (7..=15).contains(&digits)
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get the phone number with only digits (no formatting).
    pub fn digits_only(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// Whether this number is already in the canonical `DDD-DDD-DDDD`
    /// shape the store persists.
    pub fn is_canonical(&self) -> bool {
        let b = self.0.as_bytes();
        b.len() == 12
            && b[3] == b'-'
            && b[7] == b'-'
            && b.iter()
                .enumerate()
                .all(|(i, c)| if i == 3 || i == 7 { *c == b'-' } else { c.is_ascii_digit() })
    }

    /// Regroup into canonical form when exactly 10 digits remain;
    /// otherwise the number is returned unchanged.
    pub fn canonicalize(self) -> Self {
        let digits = self.digits_only();
        if digits.len() == 10 {
            Self(format!("{}-{}-{}", &digits[0..3], &digits[3..6], &digits[6..10]))
        } else {
            self
        }
    }
}

// Serde support - serialize as string
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
