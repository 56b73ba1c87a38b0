//! Infrastructure Layer
//!
//! Cross-cutting concerns: logging, AWS clients and process signals.

pub mod aws;
pub mod shutdown;
pub mod telemetry;

pub use shutdown::shutdown_signal;
