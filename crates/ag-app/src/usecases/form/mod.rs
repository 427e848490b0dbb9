//! Form use cases
//!
//! Stateful controller that owns one form's values and drives its
//! validation: debounced on blur, complete on submit.

mod controller;

pub use controller::{FormController, DEFAULT_DEBOUNCE};
