//! # Catalog Server Library
//!
//! Wires configuration, persistence, the upstream client and the REST
//! router into a runnable application.

pub mod app;
pub mod startup;
