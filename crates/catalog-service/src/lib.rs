//! # Catalog Service
//!
//! Cache-aside orchestration: validate the query, serve a fresh cached
//! result set when one exists, otherwise fetch upstream, persist the
//! entities canonically, cache the result set in the background and return
//! the requested page.

pub mod catalog_service;
pub mod dto;
pub mod r#impl;

pub use catalog_service::*;
pub use dto::*;
pub use r#impl::CatalogServiceImpl;
