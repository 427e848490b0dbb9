use std::sync::Arc;

use tracing::{info, warn};

use ag_core::auth::UserProfile;
use ag_core::ports::{AuthApiPort, KeyValueStorePort, USER_KEY, USER_TOKEN_KEY};
use ag_core::session::AuthToken;

use super::AuthError;

/// Token and user returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub token: AuthToken,
    pub user: Option<UserProfile>,
}

/// Use case for signing in.
///
/// Persists the token and the user on success so that the next launch
/// starts on the home screen.
pub struct LoginUser {
    api: Arc<dyn AuthApiPort>,
    storage: Arc<dyn KeyValueStorePort>,
}

impl LoginUser {
    pub fn new(api: Arc<dyn AuthApiPort>, storage: Arc<dyn KeyValueStorePort>) -> Self {
        Self { api, storage }
    }

    pub async fn execute(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        let outcome = self.api.login(email, password).await?;

        let token = match outcome.token.filter(|token| !token.is_empty()) {
            Some(token) if outcome.success => token,
            _ => {
                return Err(AuthError::Rejected(
                    outcome.message.unwrap_or_else(|| "Login failed".to_string()),
                ))
            }
        };

        if let Err(err) = self.storage.set(USER_TOKEN_KEY, &token).await {
            warn!(error = %err, "failed to persist token");
        }
        if let Some(user) = &outcome.user {
            match serde_json::to_string(user) {
                Ok(json) => {
                    if let Err(err) = self.storage.set(USER_KEY, &json).await {
                        warn!(error = %err, "failed to persist user");
                    }
                }
                Err(err) => warn!(error = %err, "failed to serialize user"),
            }
        }

        info!("login succeeded");
        Ok(AuthenticatedUser {
            token: AuthToken::new(token),
            user: outcome.user,
        })
    }
}
