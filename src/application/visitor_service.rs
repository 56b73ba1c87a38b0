//! Visitor Service - Main application use case
//!
//! Runs one visit: increments the shared counter, times the update,
//! reports the latency and produces the greeting. This is the primary
//! interface for the inbound adapters.

use crate::domain::entities::{LatencySample, MetricDatum, Visit};
use crate::domain::errors::{SinkError, StoreError};
use crate::domain::ports::{CounterStore, MetricsSink};
use crate::domain::value_objects::EnvironmentTag;
use std::sync::Arc;
use std::time::Instant;

/// Failure of a single invocation.
///
/// Nothing is recovered locally: every variant is surfaced to the hosting
/// platform, which turns it into a transport-level error.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Metrics(#[from] SinkError),
}

/// Static settings of the visitor service.
#[derive(Debug, Clone)]
pub struct VisitorSettings {
    /// Key of the counter row
    pub counter_id: String,
    /// Namespace the latency metric is published under
    pub metrics_namespace: String,
    /// Log and swallow sink failures instead of failing the invocation
    pub isolate_metric_errors: bool,
}

impl Default for VisitorSettings {
    fn default() -> Self {
        Self {
            counter_id: "visitor_count".to_string(),
            metrics_namespace: "MyService/VisitorApp".to_string(),
            isolate_metric_errors: false,
        }
    }
}

/// Visitor service - main application use case.
///
/// The store and sink are built once per process and shared across
/// invocations; the service itself holds no per-invocation state.
pub struct VisitorService {
    store: Arc<dyn CounterStore>,
    sink: Arc<dyn MetricsSink>,
    settings: VisitorSettings,
}

impl VisitorService {
    /// Create a new visitor service.
    pub fn new(
        store: Arc<dyn CounterStore>,
        sink: Arc<dyn MetricsSink>,
        settings: VisitorSettings,
    ) -> Self {
        Self {
            store,
            sink,
            settings,
        }
    }

    /// Record one visit.
    ///
    /// Steps, strictly in order:
    /// 1. Atomically increment the counter (single round trip)
    /// 2. Measure how long the increment took
    /// 3. Publish a `DBUpdateLatency` sample
    /// 4. Return the post-increment count for the greeting
    ///
    /// A store failure aborts before any metric is published.
    pub async fn visit(
        &self,
        environment: EnvironmentTag,
        function_name: &str,
    ) -> Result<Visit, HandlerError> {
        tracing::info!("executing for environment={}", environment);

        let started = Instant::now();
        let count = self.store.increment(&self.settings.counter_id, 1).await?;
        let sample = LatencySample::new(environment.clone(), function_name, started.elapsed());

        tracing::debug!(
            "counter {} -> {} in {:.3}ms",
            self.settings.counter_id,
            count,
            sample.elapsed_ms()
        );

        let datum = sample.into_datum(self.settings.metrics_namespace.as_str());
        self.report(&datum).await?;

        Ok(Visit::new(count, environment))
    }

    async fn report(&self, datum: &MetricDatum) -> Result<(), SinkError> {
        match self.sink.publish(datum).await {
            Err(e) if self.settings.isolate_metric_errors => {
                tracing::warn!("dropping {} sample: {}", datum.name, e);
                Ok(())
            }
            result => result,
        }
    }

    /// Get the service settings.
    pub fn settings(&self) -> &VisitorSettings {
        &self.settings
    }
}
