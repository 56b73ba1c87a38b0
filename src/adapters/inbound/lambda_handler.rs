//! Lambda Handler
//!
//! Inbound adapter for API Gateway proxy integration events delivered by
//! the Lambda runtime. Parses the event, applies the environment default
//! and wraps the visit into the proxy response envelope.

use crate::application::{HandlerError, VisitorService};
use crate::domain::value_objects::EnvironmentTag;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::Instrument;

/// Proxy integration event, reduced to the fields the handler reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    /// Stage variables of the deployment stage; API Gateway sends `null`
    /// when the stage defines none.
    #[serde(default)]
    pub stage_variables: Option<HashMap<String, String>>,
}

impl GatewayEvent {
    /// Event carrying a single `env` stage variable.
    pub fn with_env(env: impl Into<String>) -> Self {
        Self {
            stage_variables: Some(HashMap::from([("env".to_string(), env.into())])),
        }
    }

    pub fn environment(&self) -> EnvironmentTag {
        EnvironmentTag::from_stage_variables(self.stage_variables.as_ref())
    }
}

/// Proxy integration response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON document, serialized
    pub body: String,
}

impl GatewayResponse {
    /// 200 response whose body is the JSON encoding of `message`.
    pub fn json_message(message: &str) -> Self {
        Self {
            status_code: 200,
            headers: BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())]),
            body: serde_json::Value::String(message.to_string()).to_string(),
        }
    }
}

/// Run one invocation for an already-parsed event.
pub async fn handle_event(
    service: &VisitorService,
    event: GatewayEvent,
    function_name: &str,
) -> Result<GatewayResponse, HandlerError> {
    let visit = service.visit(event.environment(), function_name).await?;
    Ok(GatewayResponse::json_message(&visit.greeting()))
}

/// Lambda runtime entry point.
pub struct LambdaHandler {
    service: Arc<VisitorService>,
}

impl LambdaHandler {
    pub fn new(service: Arc<VisitorService>) -> Self {
        Self { service }
    }

    /// Handle one runtime event.
    ///
    /// Failures are returned to the runtime unchanged; it reports them as
    /// invocation errors and the gateway answers with a 5xx.
    pub async fn handle(&self, event: LambdaEvent<GatewayEvent>) -> Result<GatewayResponse, Error> {
        let (payload, context) = event.into_parts();
        let span = tracing::info_span!(
            "invocation",
            request_id = %context.request_id,
            trace_id = context.xray_trace_id.as_deref().unwrap_or("-"),
        );

        handle_event(&self.service, payload, &context.env_config.function_name)
            .instrument(span)
            .await
            .map_err(|e| {
                tracing::error!("invocation failed: {}", e);
                e.into()
            })
    }

    /// Poll the Lambda runtime API until the process is stopped.
    ///
    /// The final Ok(()) is excluded from coverage since the runtime loop runs forever.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(self) -> Result<(), Error> {
        let handler = Arc::new(self);
        tracing::info!("lambda runtime loop starting");

        lambda_runtime::run(service_fn(move |event: LambdaEvent<GatewayEvent>| {
            let handler = handler.clone();
            async move { handler.handle(event).await }
        }))
        .await
    }
}
