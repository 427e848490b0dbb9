//! Session domain module.
//!
//! This module defines the screen-selection state machine driven by
//! authentication events.

pub mod state_machine;

pub use state_machine::{
    AuthToken, Screen, SessionAction, SessionEvent, SessionState, SessionStateMachine,
};
