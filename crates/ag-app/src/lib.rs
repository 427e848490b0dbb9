//! authgate application orchestration layer
//!
//! This crate contains the use cases that drive forms and the session flow
//! on top of the ports defined in `ag-core`.

pub mod usecases;

pub use usecases::{
    FlowError, FlowOutcome, FormController, LoginFlow, LoginUser, RegisterUser, RegistrationFlow,
    SessionStore,
};
