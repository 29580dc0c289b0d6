mod mock_profile_store;

pub use mock_profile_store::{FailureMode, MockProfileStore};
