//! # Catalog Config
//!
//! Configuration management for the catalog cache.
//! Supports layered configuration from files and environment variables.
//! The resulting [`AppConfig`] is built once at startup and handed to
//! each component's constructor.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
