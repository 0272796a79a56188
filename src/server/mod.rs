//! HTTP API server
//!
//! Local HTTP server exposing the public API on 127.0.0.1: a health
//! check, the GitHub contribution endpoints, and the contact form relay.
//! Configuration comes from a YAML settings file with environment
//! overrides.

mod config;
mod error;
mod handlers;
mod server;

pub use config::{default_config_dir, AppConfig, DEFAULT_PORT};
pub use error::ApiError;
pub use handlers::{AppState, StatsResponse};
pub use server::{Server, ServerHandle, ServerManager};
