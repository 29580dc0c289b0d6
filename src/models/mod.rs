//! Data models for durable records.

pub mod profile;

pub use profile::{ContactProfile, ProfileStatus};
