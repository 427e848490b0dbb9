//! Remote authentication API port

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::{LoginOutcome, RegisterOutcome, RegisterRequest, Role, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthApiError {
    /// The server answered but refused the request.
    #[error("{message}")]
    Rejected {
        status: Option<u16>,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl AuthApiError {
    /// Message suitable for a one-shot user notification.
    pub fn user_message(&self) -> String {
        match self {
            AuthApiError::Rejected { message, .. } => message.clone(),
            AuthApiError::Transport(_) => "Could not reach the server".to_string(),
            AuthApiError::Decode(_) => "Unexpected server response".to_string(),
        }
    }
}

#[async_trait]
pub trait AuthApiPort: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, AuthApiError>;

    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthApiError>;

    /// Profile of the user owning the stored token.
    async fn get_profile(&self) -> Result<UserProfile, AuthApiError>;

    async fn get_roles(&self) -> Result<Vec<Role>, AuthApiError>;

    async fn check_email_exists(&self, email: &str) -> Result<bool, AuthApiError>;
}
