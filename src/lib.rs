//! Contact Intake - conversational intake agent core.
//!
//! This library chats alongside a human over a messaging channel and
//! opportunistically harvests structured contact data (email, phone)
//! from free-form text, persisting it without ever overwriting a
//! previously captured value.
//!
//! # Architecture
//!
//! - **domain**: validated value objects (email, phone, profile key)
//! - **extract**: the ordered extraction cascades and candidate type
//! - **models**: the durable contact profile record
//! - **store**: the profile store adapter (in-memory and HTTP-backed)
//! - **client**: ureq HTTP plumbing for the durable backend
//! - **merge**: the merge coordinator owning the only write path
//! - **session**: conversation orchestration around the pipeline
//! - **cache**: TTL cache backing conversation contexts
//! - **config**: environment-driven configuration
//! - **error**: error types per concern
//! - **metrics**: atomic counters for pipeline outcomes

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod merge;
pub mod metrics;
pub mod models;
pub mod session;
pub mod store;

pub use cache::TimedCache;
pub use client::{AsyncProfileClient, AsyncProfileClientImpl, ProfileApiClient};
pub use config::{Config, StoreBackend};
pub use domain::{EmailAddress, PhoneNumber, ProfileKey, ValidationError};
pub use error::{ConfigError, StoreError};
pub use extract::{extract_email, extract_phone, process_message, ContactCandidate};
pub use merge::{MergeCoordinator, MergeOutcome, MessageContext};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{ContactProfile, ProfileStatus};
pub use session::{IntakeSession, PromptResponder, ResponseGenerator};
pub use store::{ApiStore, CreateDefaults, MemoryStore, MergeFields, ProfileStore};
