//! Integration tests for the request handler
//!
//! Drives full invocations through the inbound adapter with in-process
//! counter stores and metrics sinks.

use async_trait::async_trait;
use std::sync::Arc;
use visitor_counter::adapters::outbound::{DashMapCounterStore, MemoryMetricsSink, SqliteCounterStore};
use visitor_counter::{
    handle_event, CounterStore, GatewayEvent, GatewayResponse, HandlerError, StoreError,
    VisitorCount, VisitorService, VisitorSettings,
};

fn decode_greeting(response: &GatewayResponse) -> String {
    serde_json::from_str(&response.body).expect("body is a JSON string")
}

/// Parse "Hello! You are visitor number <n> in the [<tag>] environment."
fn parse_greeting(message: &str) -> Option<(i64, String)> {
    let rest = message.strip_prefix("Hello! You are visitor number ")?;
    let (number, rest) = rest.split_once(" in the [")?;
    let tag = rest.strip_suffix("] environment.")?;
    Some((number.parse().ok()?, tag.to_string()))
}

struct UnreachableStore;

#[async_trait]
impl CounterStore for UnreachableStore {
    async fn increment(&self, _counter_id: &str, _delta: i64) -> Result<VisitorCount, StoreError> {
        Err(StoreError::Backend("ResourceNotFoundException: table not found".to_string()))
    }
}

/// Test the concrete dev scenario end to end
#[tokio::test]
async fn test_dev_scenario() {
    let store = Arc::new(DashMapCounterStore::new());
    store.seed("visitor_count", 41);
    let sink = Arc::new(MemoryMetricsSink::new());
    let service = VisitorService::new(store.clone(), sink.clone(), VisitorSettings::default());

    let event: GatewayEvent = serde_json::from_value(serde_json::json!({
        "resource": "/",
        "path": "/",
        "httpMethod": "GET",
        "stageVariables": { "env": "dev" }
    }))
    .unwrap();

    let response = handle_event(&service, event, "visitor-fn").await.unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.headers["Content-Type"], "application/json");
    assert_eq!(
        decode_greeting(&response),
        "Hello! You are visitor number 42 in the [dev] environment."
    );
    assert_eq!(store.get("visitor_count"), Some(42));

    let published = sink.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].name, "DBUpdateLatency");
    assert_eq!(published[0].namespace, "MyService/VisitorApp");
    assert_eq!(published[0].dimension("Environment"), Some("dev"));
    assert_eq!(published[0].dimension("FunctionName"), Some("visitor-fn"));
}

/// Test the response shape for a variety of environment tags
#[tokio::test]
async fn test_response_shape_for_any_tag() {
    let store = Arc::new(DashMapCounterStore::new());
    let sink = Arc::new(MemoryMetricsSink::new());
    let service = VisitorService::new(store, sink.clone(), VisitorSettings::default());

    let events = vec![
        (GatewayEvent::default(), "unknown"),
        (GatewayEvent::with_env("prod"), "prod"),
        (GatewayEvent::with_env(""), ""),
        (GatewayEvent::with_env("feature [x]"), "feature [x]"),
    ];

    for (i, (event, tag)) in events.into_iter().enumerate() {
        let response = handle_event(&service, event, "fn").await.unwrap();
        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized["statusCode"], 200);
        assert_eq!(serialized["headers"]["Content-Type"], "application/json");

        let message = decode_greeting(&response);
        let (number, parsed_tag) = parse_greeting(&message).expect("greeting format");
        assert_eq!(number, i as i64 + 1);
        assert_eq!(parsed_tag, tag);
    }

    for datum in sink.published() {
        assert!(datum.value >= 0.0);
    }
    assert_eq!(sink.len(), 4);
}

/// Test that concurrent invocations never lose an increment
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_invocations_are_monotonic() {
    let store = Arc::new(DashMapCounterStore::new());
    store.seed("visitor_count", 100);
    let sink = Arc::new(MemoryMetricsSink::new());
    let service = Arc::new(VisitorService::new(
        store.clone(),
        sink.clone(),
        VisitorSettings::default(),
    ));

    let invocations = (0..50).map(|i| {
        let service = service.clone();
        tokio::spawn(async move {
            let env = if i % 2 == 0 { "dev" } else { "prod" };
            let response = handle_event(&service, GatewayEvent::with_env(env), "fn")
                .await
                .unwrap();
            parse_greeting(&decode_greeting(&response)).unwrap().0
        })
    });

    let mut numbers: Vec<i64> = futures::future::join_all(invocations)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    numbers.sort_unstable();

    assert_eq!(numbers, (101..=150).collect::<Vec<_>>());
    assert_eq!(store.get("visitor_count"), Some(150));
    assert_eq!(sink.len(), 50);
}

/// Test monotonicity against the durable SQLite store
#[tokio::test]
async fn test_sqlite_backed_invocations() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let store = Arc::new(SqliteCounterStore::open(file.path().to_str().unwrap()).unwrap());
    let sink = Arc::new(MemoryMetricsSink::new());
    let service = VisitorService::new(store.clone(), sink, VisitorSettings::default());

    for _ in 0..3 {
        handle_event(&service, GatewayEvent::with_env("dev"), "fn")
            .await
            .unwrap();
    }

    assert_eq!(store.current("visitor_count").unwrap(), Some(3));
}

/// Test that a store failure aborts the whole invocation
#[tokio::test]
async fn test_store_failure_aborts_invocation() {
    let sink = Arc::new(MemoryMetricsSink::new());
    let service = VisitorService::new(
        Arc::new(UnreachableStore),
        sink.clone(),
        VisitorSettings::default(),
    );

    let result = handle_event(&service, GatewayEvent::with_env("dev"), "fn").await;

    match result {
        Err(HandlerError::Store(StoreError::Backend(msg))) => {
            assert!(msg.contains("ResourceNotFoundException"))
        }
        other => panic!("expected store failure, got {:?}", other),
    }
    assert!(sink.is_empty());
}

/// Test that sink failures can be isolated from the response
#[tokio::test]
#[tracing_test::traced_test]
async fn test_isolated_sink_failure_still_responds() {
    let store = Arc::new(DashMapCounterStore::new());
    let sink = Arc::new(MemoryMetricsSink::new());
    sink.set_failing(true);
    let service = VisitorService::new(
        store.clone(),
        sink.clone(),
        VisitorSettings {
            isolate_metric_errors: true,
            ..VisitorSettings::default()
        },
    );

    let response = handle_event(&service, GatewayEvent::with_env("prod"), "fn")
        .await
        .unwrap();

    assert_eq!(
        decode_greeting(&response),
        "Hello! You are visitor number 1 in the [prod] environment."
    );
    assert!(sink.is_empty());
    assert!(logs_contain("dropping DBUpdateLatency sample"));
}
