//! authgate client core
//!
//! Process entry wiring: tracing setup, configuration loading and
//! construction of the session store and screen flows.

pub mod bootstrap;

pub use bootstrap::{init_tracing_subscriber, load_app_config, wire, AppContext};
