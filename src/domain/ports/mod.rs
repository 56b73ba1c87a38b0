mod counter_store;
mod metrics_sink;

pub use counter_store::CounterStore;
pub use metrics_sink::MetricsSink;
