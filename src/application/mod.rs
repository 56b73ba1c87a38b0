//! Application Layer
//!
//! Use cases that orchestrate the domain ports.

mod visitor_service;

pub use visitor_service::{HandlerError, VisitorService, VisitorSettings};
