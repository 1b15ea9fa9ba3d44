//! envx client - HTTP transport for the environment service
//!
//! Implements [`envx_core::EnvironmentClient`] over the service's REST API.

pub mod config;
pub mod errors;
pub mod http;

pub use config::ClientConfig;
pub use http::HttpEnvironmentClient;
