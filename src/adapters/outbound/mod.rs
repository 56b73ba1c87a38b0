mod cloudwatch_metrics_sink;
mod dashmap_counter_store;
mod dynamodb_counter_store;
mod memory_metrics_sink;
mod sqlite_counter_store;

pub use cloudwatch_metrics_sink::CloudWatchMetricsSink;
pub use dashmap_counter_store::DashMapCounterStore;
pub use dynamodb_counter_store::DynamoDbCounterStore;
pub use memory_metrics_sink::MemoryMetricsSink;
pub use sqlite_counter_store::SqliteCounterStore;
