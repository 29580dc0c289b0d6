//! Profile store adapters.
//!
//! The storage technology is hidden behind the [`ProfileStore`] trait;
//! the backend is chosen once at startup from configuration, never
//! probed per call.

pub mod api;
pub mod memory;
pub mod traits;

pub use api::ApiStore;
pub use memory::MemoryStore;
pub use traits::{CreateDefaults, MergeFields, ProfileStore};
