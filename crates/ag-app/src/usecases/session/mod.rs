//! Session use cases
//!
//! The session store owns the process-wide session state and applies the
//! session state machine's side effects to persisted storage.

mod store;

pub use store::SessionStore;
