//! visitor-counter - Lambda function with Hexagonal Architecture
//!
//! This is the composition root that wires together all the components.

use std::sync::Arc;
use visitor_counter::adapters::inbound::{GatewayState, LambdaHandler, LocalGateway};
use visitor_counter::adapters::outbound::{
    CloudWatchMetricsSink, DashMapCounterStore, DynamoDbCounterStore, MemoryMetricsSink,
    SqliteCounterStore,
};
use visitor_counter::config::{load_config, Config};
use visitor_counter::domain::ports::{CounterStore, MetricsSink};
use visitor_counter::domain::value_objects::{SinkBackend, StoreBackend};
use visitor_counter::infrastructure::{aws, telemetry};
use visitor_counter::VisitorService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    telemetry::init(cfg.debug);

    tracing::info!(
        "starting visitor-counter store={} sink={} table={}",
        cfg.store_backend.as_str(),
        cfg.sink_backend.as_str(),
        cfg.table_name
    );

    // ===== COMPOSITION ROOT =====
    // Clients are built once per process and shared by every invocation

    // 1. Create outbound adapters
    let sdk_config = if cfg.store_backend == StoreBackend::DynamoDb
        || cfg.sink_backend == SinkBackend::CloudWatch
    {
        Some(aws::load_sdk_config(cfg.aws_endpoint_url.as_deref()).await)
    } else {
        None
    };

    let store: Arc<dyn CounterStore> = match (cfg.store_backend, &sdk_config) {
        (StoreBackend::DynamoDb, Some(sdk)) => Arc::new(DynamoDbCounterStore::new(
            aws::dynamodb_client(sdk),
            cfg.table_name.clone(),
            cfg.counter_attribute.clone(),
        )),
        (StoreBackend::Sqlite, _) => Arc::new(SqliteCounterStore::open(&cfg.sqlite_path)?),
        _ => Arc::new(DashMapCounterStore::new()),
    };

    let sink: Arc<dyn MetricsSink> = match (cfg.sink_backend, &sdk_config) {
        (SinkBackend::CloudWatch, Some(sdk)) => {
            Arc::new(CloudWatchMetricsSink::new(aws::cloudwatch_client(sdk)))
        }
        _ => Arc::new(MemoryMetricsSink::new()),
    };

    // 2. Create application service
    let service = Arc::new(VisitorService::new(store, sink, cfg.visitor_settings()));

    // 3. Create inbound adapter and run
    run_inbound(&cfg, service).await
}

async fn run_inbound(cfg: &Config, service: Arc<VisitorService>) -> anyhow::Result<()> {
    match &cfg.local_listen_addr {
        Some(addr) => {
            let state = GatewayState::new(
                service,
                cfg.local_stage.clone(),
                cfg.local_function_name.clone(),
            );
            LocalGateway::new(addr.clone(), state).run().await
        }
        None => LambdaHandler::new(service)
            .run()
            .await
            .map_err(|e| anyhow::anyhow!(e)),
    }
}
