//! # ag-core
//!
//! Core domain models and rules for authgate.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the validation schema engine, the password strength scorer, form state types
//! and the session flow state machine. External collaborators are reached
//! through the traits in [`ports`].

// Public module exports
pub mod auth;
pub mod config;
pub mod form;
pub mod password;
pub mod ports;
pub mod session;
pub mod validation;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use form::{FieldState, FieldView, FormState};
pub use password::{PasswordStrength, StrengthLevel};
pub use session::{AuthToken, Screen, SessionAction, SessionEvent, SessionState, SessionStateMachine};
pub use validation::{FieldRule, FormSchema, FormValues};
