mod auth_api;
mod dto;

pub use auth_api::HttpAuthApi;
