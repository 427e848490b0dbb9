//! Screen flows
//!
//! Glue between a form, the auth use cases and the session store: validate,
//! call the API, and move the session forward on success.

mod login;
mod registration;

pub use login::LoginFlow;
pub use registration::RegistrationFlow;

use ag_core::validation::SchemaError;

/// Result of submitting a flow's form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Client-side validation failed; errors are on the form.
    Invalid,
    /// The API call failed; `message` is shown once to the user.
    Failed { message: String },
    Succeeded,
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("invalid form schema: {0}")]
    Schema(#[from] SchemaError),
}
