//! REST API controllers.

pub mod character_controller;
pub mod health_controller;

pub use health_controller::*;
