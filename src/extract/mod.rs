//! Contact extraction from free-form message text.
//!
//! Extraction is pure and stateless: any number of messages can be
//! scanned concurrently with no shared mutable state. The single entry
//! point consumed by the message-handling layer is [`process_message`],
//! which never panics and never returns an error; a miss is a candidate
//! with empty fields, not a failure.

pub mod email;
pub mod normalize;
pub mod phone;

pub use email::{extract_email, extract_email_traced, EmailStrategy};
pub use normalize::{digits_only, normalize_phone};
pub use phone::{extract_phone, extract_phone_traced, PhoneStrategy};

use serde::Serialize;

/// The ephemeral result of scanning one message.
///
/// Owned solely by the call that produced it; never persisted. Both
/// fields are unvalidated candidates: the merge coordinator gates them
/// through the domain constructors before anything durable happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactCandidate {
    /// Extracted email, if any. Local-part case preserved as provided.
    pub email: Option<String>,

    /// Extracted phone, if any. 10-digit numbers arrive canonical
    /// (`DDD-DDD-DDDD`); other in-range numbers arrive as matched.
    pub phone: Option<String>,

    /// True when at least one field was found.
    pub has_contact_info: bool,

    /// True iff both fields are absent: the conversation should keep
    /// asking.
    pub needs_clarification: bool,
}

impl ContactCandidate {
    /// Build a candidate from raw extractor output.
    pub fn from_fields(email: Option<String>, phone: Option<String>) -> Self {
        let has_contact_info = email.is_some() || phone.is_some();
        Self {
            email,
            phone,
            has_contact_info,
            needs_clarification: !has_contact_info,
        }
    }

    /// The degraded no-information candidate.
    pub fn empty() -> Self {
        Self::from_fields(None, None)
    }
}

/// Scan one message for contact information.
///
/// This function must never abort the caller's conversation turn: any
/// internal failure inside the cascades is contained, reported through
/// the logging layer, and degrades to the empty candidate.
pub fn process_message(text: &str) -> ContactCandidate {
    let outcome = std::panic::catch_unwind(|| {
        let email = extract_email(text);
        let phone = extract_phone(text);
        ContactCandidate::from_fields(email, phone)
    });

    match outcome {
        Ok(candidate) => candidate,
        Err(_) => {
            tracing::error!(
                text_len = text.len(),
                "extraction failed internally; degrading to empty candidate"
            );
            ContactCandidate::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_fields_extracted() {
        let candidate =
            process_message("email me at john@example.com or call 555-123-4567");
        assert_eq!(candidate.email.as_deref(), Some("john@example.com"));
        assert_eq!(candidate.phone.as_deref(), Some("555-123-4567"));
        assert!(candidate.has_contact_info);
        assert!(!candidate.needs_clarification);
    }

    #[test]
    fn test_email_only() {
        let candidate = process_message("it's jane@corp.io");
        assert_eq!(candidate.email.as_deref(), Some("jane@corp.io"));
        assert_eq!(candidate.phone, None);
        assert!(candidate.has_contact_info);
    }

    #[test]
    fn test_empty_input_never_panics() {
        let candidate = process_message("");
        assert!(!candidate.has_contact_info);
        assert!(candidate.needs_clarification);
    }

    #[test]
    fn test_plain_chatter_needs_clarification() {
        let candidate = process_message("hello, how are you today?");
        assert_eq!(candidate.email, None);
        assert_eq!(candidate.phone, None);
        assert!(candidate.needs_clarification);
    }
}
