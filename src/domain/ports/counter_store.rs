//! Counter Store Port
//!
//! Defines the interface for the durable visitor counter.
//! Implementations may use DynamoDB, SQLite, or in-memory storage.

use crate::domain::entities::VisitorCount;
use crate::domain::errors::StoreError;
use async_trait::async_trait;

/// Durable store holding named numeric counters.
///
/// This is an outbound port. The only operation is an atomic add that
/// returns the post-increment value in the same round trip; callers must
/// never read and then write a counter as two separate operations.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically add `delta` to the counter `counter_id` and return the
    /// new value. A counter that does not exist yet starts at zero.
    async fn increment(&self, counter_id: &str, delta: i64) -> Result<VisitorCount, StoreError>;
}
