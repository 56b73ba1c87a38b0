//! DashMap Counter Store
//!
//! Implements CounterStore in process memory using DashMap for
//! lock-free concurrent access. Counts are lost when the process exits.

use crate::domain::entities::VisitorCount;
use crate::domain::errors::StoreError;
use crate::domain::ports::CounterStore;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// DashMap-backed counter store.
pub struct DashMapCounterStore {
    counters: DashMap<String, AtomicI64>,
}

impl DashMapCounterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            counters: DashMap::new(),
        }
    }

    /// Set a counter to a starting value.
    pub fn seed(&self, counter_id: &str, value: i64) {
        self.counters
            .entry(counter_id.to_string())
            .or_default()
            .store(value, Ordering::SeqCst);
    }

    /// Current value of a counter, if it has ever been touched.
    pub fn get(&self, counter_id: &str) -> Option<i64> {
        self.counters
            .get(counter_id)
            .map(|c| c.load(Ordering::SeqCst))
    }
}

impl Default for DashMapCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CounterStore for DashMapCounterStore {
    async fn increment(&self, counter_id: &str, delta: i64) -> Result<VisitorCount, StoreError> {
        let previous = self
            .counters
            .entry(counter_id.to_string())
            .or_default()
            .fetch_add(delta, Ordering::SeqCst);
        Ok(VisitorCount(previous + delta))
    }
}
