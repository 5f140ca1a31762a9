//! Data transfer objects exposed by the transport layer.

mod character_dto;

pub use character_dto::*;
