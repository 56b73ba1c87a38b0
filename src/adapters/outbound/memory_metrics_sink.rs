//! In-Memory Metrics Sink
//!
//! Implements MetricsSink by keeping the most recent published data in
//! process memory and logging each one. Used for local runs and as a test
//! double.

use crate::domain::entities::MetricDatum;
use crate::domain::errors::SinkError;
use crate::domain::ports::MetricsSink;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Samples kept by default; older ones are evicted first.
pub const DEFAULT_RETAINED: usize = 1024;

/// Recording metrics sink with bounded retention.
pub struct MemoryMetricsSink {
    published: RwLock<VecDeque<MetricDatum>>,
    capacity: usize,
    /// Every successful publish, including evicted samples
    total: AtomicU64,
    /// When set, every publish fails without recording
    failing: AtomicBool,
}

impl MemoryMetricsSink {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RETAINED)
    }

    /// Sink keeping at most `capacity` samples (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            published: RwLock::new(VecDeque::with_capacity(capacity.min(DEFAULT_RETAINED))),
            capacity,
            total: AtomicU64::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Make subsequent publishes fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of the retained samples, oldest first.
    pub fn published(&self) -> Vec<MetricDatum> {
        self.published.read().iter().cloned().collect()
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.published.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of successful publishes since creation.
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MemoryMetricsSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricsSink for MemoryMetricsSink {
    async fn publish(&self, datum: &MetricDatum) -> Result<(), SinkError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SinkError::Backend("memory sink set to fail".to_string()));
        }

        tracing::info!(
            namespace = %datum.namespace,
            metric = %datum.name,
            value = datum.value,
            unit = %datum.unit,
            dimensions = ?datum.dimensions,
            "metric published"
        );

        {
            let mut published = self.published.write();
            if published.len() == self.capacity {
                published.pop_front();
            }
            published.push_back(datum.clone());
        }
        self.total.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
