//! Key-value storage port
//!
//! Persisted string storage for session facts. Implementations are provided
//! by the infrastructure layer (file-based or in-memory).

use async_trait::async_trait;

/// Stored bearer token.
pub const USER_TOKEN_KEY: &str = "userToken";
/// JSON-serialized signed-in user.
pub const USER_KEY: &str = "user";
/// `"true"` once the onboarding screens have been shown.
pub const HAS_SEEN_ONBOARDING_KEY: &str = "hasSeenOnboarding";

#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// Get the value stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Remove `key`; removing an absent key is not an error.
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}
