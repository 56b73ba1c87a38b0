//! visitor-counter Library
//!
//! This module exposes the visitor counter components for use in
//! integration tests and as a library.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use adapters::inbound::{handle_event, GatewayEvent, GatewayResponse, LambdaHandler};
pub use application::{HandlerError, VisitorService, VisitorSettings};
pub use config::load_config;
pub use domain::entities::{LatencySample, MetricDatum, Visit, VisitorCount};
pub use domain::errors::{SinkError, StoreError};
pub use domain::ports::{CounterStore, MetricsSink};
pub use domain::value_objects::EnvironmentTag;
