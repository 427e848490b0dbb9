pub mod auth;
pub mod flows;
pub mod form;
pub mod session;

pub use auth::{
    AuthError, AuthenticatedUser, EmailAvailabilityValidator, ListRoles, LoadProfile, LoginUser,
    RegisterUser,
};
pub use flows::{FlowError, FlowOutcome, LoginFlow, RegistrationFlow};
pub use form::FormController;
pub use session::SessionStore;
