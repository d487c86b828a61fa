//! Domain layer for CityCast
//!
//! Contains the places, forecasts and search events the service reasons about,
//! plus the validated value objects that guard its inputs.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
