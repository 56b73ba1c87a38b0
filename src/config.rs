use crate::application::VisitorSettings;
use crate::domain::value_objects::{SinkBackend, StoreBackend};

#[derive(Debug, Clone)]
pub struct Config {
    // Counter store settings
    pub table_name: String,
    pub counter_id: String,
    pub counter_attribute: String,
    pub store_backend: StoreBackend,
    pub sqlite_path: String,

    // Metrics settings
    pub metrics_namespace: String,
    pub sink_backend: SinkBackend,
    pub isolate_metric_errors: bool,

    // AWS settings
    pub aws_endpoint_url: Option<String>,

    // Local gateway settings
    pub local_listen_addr: Option<String>,
    pub local_stage: String,
    pub local_function_name: String,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: "DVA-Test-Table".to_string(),
            counter_id: "visitor_count".to_string(),
            counter_attribute: "count_num".to_string(),
            store_backend: StoreBackend::DynamoDb,
            sqlite_path: "visitors.db".to_string(),
            metrics_namespace: "MyService/VisitorApp".to_string(),
            sink_backend: SinkBackend::CloudWatch,
            isolate_metric_errors: false,
            aws_endpoint_url: None,
            local_listen_addr: None,
            local_stage: "dev".to_string(),
            local_function_name: "visitor-counter-local".to_string(),
            debug: false,
        }
    }
}

impl Config {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_name.is_empty() {
            return Err(ConfigError::MissingTableName);
        }
        if self.counter_id.is_empty() {
            return Err(ConfigError::MissingCounterId);
        }
        if self.counter_attribute.is_empty() {
            return Err(ConfigError::MissingCounterAttribute);
        }
        if self.metrics_namespace.is_empty() {
            return Err(ConfigError::MissingNamespace);
        }
        Ok(())
    }

    /// Settings handed to the visitor service.
    pub fn visitor_settings(&self) -> VisitorSettings {
        VisitorSettings {
            counter_id: self.counter_id.clone(),
            metrics_namespace: self.metrics_namespace.clone(),
            isolate_metric_errors: self.isolate_metric_errors,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("table name is required")]
    MissingTableName,
    #[error("counter id is required")]
    MissingCounterId,
    #[error("counter attribute is required")]
    MissingCounterAttribute,
    #[error("metrics namespace is required")]
    MissingNamespace,
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false)
}

pub fn load_config() -> anyhow::Result<Config> {
    let table_name = std::env::var("VISITOR_TABLE_NAME")
        .unwrap_or_else(|_| "DVA-Test-Table".to_string());

    let counter_id = std::env::var("VISITOR_COUNTER_ID")
        .unwrap_or_else(|_| "visitor_count".to_string());

    let counter_attribute = std::env::var("VISITOR_COUNTER_ATTRIBUTE")
        .unwrap_or_else(|_| "count_num".to_string());

    let store_backend = std::env::var("VISITOR_STORE_BACKEND")
        .map(|v| StoreBackend::from_str(&v))
        .unwrap_or_default();

    let sqlite_path = std::env::var("VISITOR_SQLITE_PATH")
        .unwrap_or_else(|_| "visitors.db".to_string());

    // Metrics settings
    let metrics_namespace = std::env::var("VISITOR_METRICS_NAMESPACE")
        .unwrap_or_else(|_| "MyService/VisitorApp".to_string());

    let sink_backend = std::env::var("VISITOR_SINK_BACKEND")
        .map(|v| SinkBackend::from_str(&v))
        .unwrap_or_default();

    let isolate_metric_errors = env_flag("VISITOR_ISOLATE_METRIC_ERRORS");

    let aws_endpoint_url = std::env::var("VISITOR_AWS_ENDPOINT_URL").ok();

    // Local gateway settings
    let local_listen_addr = std::env::var("VISITOR_LOCAL_LISTEN_ADDR").ok();

    let local_stage = std::env::var("VISITOR_LOCAL_STAGE")
        .unwrap_or_else(|_| "dev".to_string());

    let local_function_name = std::env::var("VISITOR_LOCAL_FUNCTION_NAME")
        .unwrap_or_else(|_| "visitor-counter-local".to_string());

    let debug = std::env::var("DEBUG").is_ok();

    let cfg = Config {
        table_name,
        counter_id,
        counter_attribute,
        store_backend,
        sqlite_path,
        metrics_namespace,
        sink_backend,
        isolate_metric_errors,
        aws_endpoint_url,
        local_listen_addr,
        local_stage,
        local_function_name,
        debug,
    };
    cfg.validate()?;
    Ok(cfg)
}
