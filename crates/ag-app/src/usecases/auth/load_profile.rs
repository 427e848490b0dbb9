use std::sync::Arc;

use ag_core::auth::UserProfile;
use ag_core::ports::AuthApiPort;

use super::AuthError;

/// Fetch the profile of the signed-in user.
///
/// The bearer token is attached by the API adapter.
pub struct LoadProfile {
    api: Arc<dyn AuthApiPort>,
}

impl LoadProfile {
    pub fn new(api: Arc<dyn AuthApiPort>) -> Self {
        Self { api }
    }

    pub async fn execute(&self) -> Result<UserProfile, AuthError> {
        Ok(self.api.get_profile().await?)
    }
}
