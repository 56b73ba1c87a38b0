//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the visitor counter.
//! They have no external dependencies and contain only business logic.

use crate::domain::value_objects::{EnvironmentTag, MetricUnit};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// Metric name for the counter update latency.
pub const DB_UPDATE_LATENCY: &str = "DBUpdateLatency";

/// Dimension name carrying the environment tag.
pub const ENVIRONMENT_DIMENSION: &str = "Environment";

/// Dimension name carrying the function identity.
pub const FUNCTION_NAME_DIMENSION: &str = "FunctionName";

/// Post-increment value of the shared visitor counter.
///
/// The row itself lives in the counter store; this is the value the store
/// returned from a single atomic add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitorCount(pub i64);

impl VisitorCount {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for VisitorCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Latency of one counter update, measured by a single invocation.
///
/// Ephemeral: built after the increment returns, converted into a
/// [`MetricDatum`] and dropped when the invocation ends.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencySample {
    pub environment: EnvironmentTag,
    pub function_name: String,
    pub elapsed: Duration,
}

impl LatencySample {
    pub fn new(environment: EnvironmentTag, function_name: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            environment,
            function_name: function_name.into(),
            elapsed,
        }
    }

    /// Elapsed time in fractional milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Build the `DBUpdateLatency` data point for this sample.
    pub fn into_datum(self, namespace: impl Into<String>) -> MetricDatum {
        let value = self.elapsed_ms();
        MetricDatum {
            namespace: namespace.into(),
            name: DB_UPDATE_LATENCY.to_string(),
            value,
            unit: MetricUnit::Milliseconds,
            dimensions: vec![
                Dimension::new(ENVIRONMENT_DIMENSION, self.environment.as_str()),
                Dimension::new(FUNCTION_NAME_DIMENSION, self.function_name),
            ],
            timestamp: SystemTime::now(),
        }
    }
}

/// Name/value tag attached to a metric sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One timestamped numeric sample handed to a metrics sink.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDatum {
    pub namespace: String,
    pub name: String,
    pub value: f64,
    pub unit: MetricUnit,
    /// Dimensions in the order they were attached
    pub dimensions: Vec<Dimension>,
    pub timestamp: SystemTime,
}

impl MetricDatum {
    /// Look up a dimension value by name.
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }
}

/// Outcome of one successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub count: VisitorCount,
    pub environment: EnvironmentTag,
}

impl Visit {
    pub fn new(count: VisitorCount, environment: EnvironmentTag) -> Self {
        Self { count, environment }
    }

    /// Greeting shown to the visitor.
    pub fn greeting(&self) -> String {
        format!(
            "Hello! You are visitor number {} in the [{}] environment.",
            self.count, self.environment
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== LatencySample Tests =====

    #[test]
    fn test_elapsed_ms_is_fractional() {
        let sample = LatencySample::new(
            EnvironmentTag::new("dev"),
            "visitor-fn",
            Duration::from_micros(12_500),
        );
        assert!((sample.elapsed_ms() - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_into_datum() {
        let sample = LatencySample::new(
            EnvironmentTag::new("prod"),
            "visitor-fn",
            Duration::from_millis(7),
        );

        let datum = sample.into_datum("MyService/VisitorApp");

        assert_eq!(datum.namespace, "MyService/VisitorApp");
        assert_eq!(datum.name, "DBUpdateLatency");
        assert_eq!(datum.unit, MetricUnit::Milliseconds);
        assert!((datum.value - 7.0).abs() < 1e-9);
        assert_eq!(datum.dimensions.len(), 2);
        assert_eq!(datum.dimensions[0], Dimension::new("Environment", "prod"));
        assert_eq!(datum.dimensions[1], Dimension::new("FunctionName", "visitor-fn"));
    }

    #[test]
    fn test_datum_dimension_lookup() {
        let datum = LatencySample::new(EnvironmentTag::default(), "fn", Duration::ZERO)
            .into_datum("ns");

        assert_eq!(datum.dimension("Environment"), Some("unknown"));
        assert_eq!(datum.dimension("FunctionName"), Some("fn"));
        assert_eq!(datum.dimension("Region"), None);
        assert_eq!(datum.value, 0.0);
    }

    // ===== Visit Tests =====

    #[test]
    fn test_greeting_format() {
        let visit = Visit::new(VisitorCount(42), EnvironmentTag::new("dev"));
        assert_eq!(
            visit.greeting(),
            "Hello! You are visitor number 42 in the [dev] environment."
        );
    }

    #[test]
    fn test_greeting_with_empty_tag() {
        let visit = Visit::new(VisitorCount(1), EnvironmentTag::new(""));
        assert_eq!(
            visit.greeting(),
            "Hello! You are visitor number 1 in the [] environment."
        );
    }

    #[test]
    fn test_visitor_count_ordering() {
        assert!(VisitorCount(41) < VisitorCount(42));
        assert_eq!(VisitorCount(42).value(), 42);
        assert_eq!(VisitorCount(42).to_string(), "42");
    }
}
