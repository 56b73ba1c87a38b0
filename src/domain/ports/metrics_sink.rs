//! Metrics Sink Port
//!
//! Defines the interface for shipping metric samples out of the process.

use crate::domain::entities::MetricDatum;
use crate::domain::errors::SinkError;
use async_trait::async_trait;

/// Destination for observability samples.
///
/// This is an outbound port. Each call submits exactly one data point.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn publish(&self, datum: &MetricDatum) -> Result<(), SinkError>;
}
