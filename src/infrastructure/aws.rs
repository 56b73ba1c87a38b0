//! AWS client creation.
//!
//! Loads the shared SDK configuration once per process; the DynamoDB and
//! CloudWatch clients are built from it and reused by every invocation.

use aws_config::{BehaviorVersion, SdkConfig};

/// Load the SDK configuration from the standard credential/region chain.
///
/// `endpoint_url` overrides the service endpoint for every client built
/// from this config (e.g. LocalStack).
pub async fn load_sdk_config(endpoint_url: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(url) = endpoint_url {
        tracing::info!("using AWS endpoint override {}", url);
        loader = loader.endpoint_url(url);
    }
    loader.load().await
}

pub fn dynamodb_client(config: &SdkConfig) -> aws_sdk_dynamodb::Client {
    aws_sdk_dynamodb::Client::new(config)
}

pub fn cloudwatch_client(config: &SdkConfig) -> aws_sdk_cloudwatch::Client {
    aws_sdk_cloudwatch::Client::new(config)
}
