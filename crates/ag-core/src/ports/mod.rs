//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. The remote auth API and the
//! persisted key-value storage are both reached through this module.

pub mod auth_api;
pub mod storage;

pub use auth_api::{AuthApiError, AuthApiPort};
pub use storage::{KeyValueStorePort, HAS_SEEN_ONBOARDING_KEY, USER_KEY, USER_TOKEN_KEY};
