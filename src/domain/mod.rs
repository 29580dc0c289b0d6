//! Domain value objects and types.
//!
//! Type-safe wrappers for profile keys, email addresses, and phone
//! numbers. Validation happens at construction time, so invalid contact
//! data cannot be represented past this boundary: these constructors are
//! the validation gate both for low-confidence extractor output and for
//! directly-submitted form data.

pub mod email;
pub mod errors;
pub mod phone;
pub mod profile_key;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use phone::PhoneNumber;
pub use profile_key::ProfileKey;
