//! # ag-infra
//!
//! Infrastructure adapters for the ports defined in `ag-core`: key-value
//! storage (file and in-memory), the HTTP auth API client, and config
//! loading.

pub mod app_paths;
pub mod config;
pub mod http;
pub mod storage;

pub use config::load_config;
pub use http::HttpAuthApi;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
