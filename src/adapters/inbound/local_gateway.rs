//! Local Gateway Server
//!
//! HTTP server standing in for API Gateway during local development.
//! Every GET injects the configured stage variables, runs one invocation
//! and maps a handler fault to the proxy integration's 502 response.

use crate::adapters::inbound::lambda_handler::{handle_event, GatewayEvent, GatewayResponse};
use crate::application::VisitorService;
use crate::infrastructure::shutdown_signal;
use axum::{
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub stage: String,
}

/// Local gateway state.
#[derive(Clone)]
pub struct GatewayState {
    pub service: Arc<VisitorService>,
    /// Stage variables injected into every event
    pub stage_variables: HashMap<String, String>,
    /// Function identity reported in metric dimensions
    pub function_name: String,
}

impl GatewayState {
    pub fn new(service: Arc<VisitorService>, stage: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self {
            service,
            stage_variables: HashMap::from([("env".to_string(), stage.into())]),
            function_name: function_name.into(),
        }
    }

    fn stage(&self) -> &str {
        self.stage_variables.get("env").map(String::as_str).unwrap_or("")
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();
        for (name, value) in self.headers {
            match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => tracing::warn!("dropping invalid response header"),
            }
        }
        response
    }
}

/// Build the gateway router.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/", get(invoke_handler))
        .route("/*path", get(invoke_handler))
        .with_state(state)
}

/// Local gateway server.
pub struct LocalGateway {
    listen_addr: String,
    state: GatewayState,
}

impl LocalGateway {
    pub fn new(listen_addr: String, state: GatewayState) -> Self {
        Self { listen_addr, state }
    }

    /// Run until SIGINT/SIGTERM.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self) -> anyhow::Result<()> {
        let app = router(self.state.clone()).layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!(
            "local gateway listening on {} stage={}",
            self.listen_addr,
            self.state.stage()
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

// Handler functions

async fn health_handler(State(state): State<GatewayState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        stage: state.stage().to_string(),
    })
}

async fn invoke_handler(State(state): State<GatewayState>) -> Response {
    let event = GatewayEvent {
        stage_variables: Some(state.stage_variables.clone()),
    };
    let span = tracing::info_span!("invocation", request_id = %uuid::Uuid::new_v4());

    match handle_event(&state.service, event, &state.function_name)
        .instrument(span)
        .await
    {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!("invocation failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "message": "Internal server error" })),
            )
                .into_response()
        }
    }
}
