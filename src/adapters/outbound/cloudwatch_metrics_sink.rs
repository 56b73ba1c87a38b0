//! CloudWatch Metrics Sink
//!
//! Implements MetricsSink with one `PutMetricData` call per sample.

use crate::domain::entities::MetricDatum;
use crate::domain::errors::SinkError;
use crate::domain::ports::MetricsSink;
use crate::domain::value_objects::MetricUnit;
use async_trait::async_trait;
use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::{self as cw, StandardUnit};
use aws_sdk_cloudwatch::Client;

/// CloudWatch-backed metrics sink.
#[derive(Clone)]
pub struct CloudWatchMetricsSink {
    client: Client,
}

impl CloudWatchMetricsSink {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn standard_unit(unit: MetricUnit) -> StandardUnit {
    match unit {
        MetricUnit::Milliseconds => StandardUnit::Milliseconds,
    }
}

/// Convert a domain datum into the SDK representation.
fn to_cloudwatch(datum: &MetricDatum) -> cw::MetricDatum {
    let dimensions = datum
        .dimensions
        .iter()
        .map(|d| cw::Dimension::builder().name(&d.name).value(&d.value).build())
        .collect();

    cw::MetricDatum::builder()
        .metric_name(&datum.name)
        .value(datum.value)
        .unit(standard_unit(datum.unit))
        .timestamp(DateTime::from(datum.timestamp))
        .set_dimensions(Some(dimensions))
        .build()
}

#[async_trait]
impl MetricsSink for CloudWatchMetricsSink {
    #[tracing::instrument(
        name = "cloudwatch.put_metric_data",
        skip(self, datum),
        fields(namespace = %datum.namespace, metric = %datum.name)
    )]
    async fn publish(&self, datum: &MetricDatum) -> Result<(), SinkError> {
        let metric = to_cloudwatch(datum);

        self.client
            .put_metric_data()
            .namespace(&datum.namespace)
            .metric_data(metric)
            .send()
            .await
            .map_err(|e| SinkError::Backend(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::entities::LatencySample;
    use crate::domain::value_objects::EnvironmentTag;
    use std::time::Duration;

    #[test]
    fn test_standard_unit_mapping() {
        assert_eq!(standard_unit(MetricUnit::Milliseconds), StandardUnit::Milliseconds);
    }

    #[test]
    fn test_to_cloudwatch_carries_name_and_dimensions() {
        let datum = LatencySample::new(
            EnvironmentTag::new("dev"),
            "visitor-fn",
            Duration::from_millis(3),
        )
        .into_datum("MyService/VisitorApp");

        let metric = to_cloudwatch(&datum);

        assert_eq!(metric.metric_name(), Some("DBUpdateLatency"));
        assert_eq!(metric.unit(), Some(&StandardUnit::Milliseconds));
        assert!((metric.value().unwrap() - 3.0).abs() < 1e-9);
        assert!(metric.timestamp().is_some());

        let dimensions: Vec<(Option<&str>, Option<&str>)> = metric
            .dimensions()
            .iter()
            .map(|d| (d.name(), d.value()))
            .collect();
        assert_eq!(
            dimensions,
            vec![
                (Some("Environment"), Some("dev")),
                (Some("FunctionName"), Some("visitor-fn")),
            ]
        );
    }

    #[test]
    fn test_to_cloudwatch_keeps_fractional_milliseconds() {
        let datum = LatencySample::new(
            EnvironmentTag::default(),
            "fn",
            Duration::from_micros(1500),
        )
        .into_datum("ns");

        let metric = to_cloudwatch(&datum);
        assert!((metric.value().unwrap() - 1.5).abs() < 1e-9);
        assert_eq!(metric.dimensions()[0].value(), Some("unknown"));
    }
}
