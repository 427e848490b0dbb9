//! Auth use cases
//!
//! Thin wrappers over [`AuthApiPort`](ag_core::ports::AuthApiPort) that turn
//! API responses into typed results and persist the signed-in session.

mod email_availability;
mod list_roles;
mod load_profile;
mod login;
mod register;

pub use email_availability::{EmailAvailabilityValidator, EMAIL_TAKEN_MESSAGE};
pub use list_roles::ListRoles;
pub use load_profile::LoadProfile;
pub use login::{AuthenticatedUser, LoginUser};
pub use register::RegisterUser;

use ag_core::ports::AuthApiError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] AuthApiError),
    /// The API answered without success.
    #[error("{0}")]
    Rejected(String),
}

impl AuthError {
    /// Message for a one-shot user notification.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Api(err) => err.user_message(),
            AuthError::Rejected(message) => message.clone(),
        }
    }
}
