//! Domain Layer
//!
//! Entities, value objects and the outbound ports the application
//! service depends on.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;
