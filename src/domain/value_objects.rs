//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stage variable key the gateway uses to name the environment.
pub const STAGE_ENV_KEY: &str = "env";

/// Deployment environment that served a request ("dev", "prod", ...).
///
/// The tag is taken verbatim from the gateway's stage variables. No
/// validation is applied: an empty string is a valid tag and is forwarded
/// as-is to the metric dimension and the greeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentTag(String);

impl EnvironmentTag {
    /// Tag used when the gateway did not supply one.
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Extract the tag from an optional stage variable map.
    ///
    /// # Examples
    /// ```
    /// use visitor_counter::EnvironmentTag;
    /// use std::collections::HashMap;
    ///
    /// let vars = HashMap::from([("env".to_string(), "prod".to_string())]);
    /// assert_eq!(EnvironmentTag::from_stage_variables(Some(&vars)).as_str(), "prod");
    /// assert_eq!(EnvironmentTag::from_stage_variables(None).as_str(), "unknown");
    /// ```
    pub fn from_stage_variables(vars: Option<&HashMap<String, String>>) -> Self {
        vars.and_then(|v| v.get(STAGE_ENV_KEY))
            .map(|tag| Self(tag.clone()))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EnvironmentTag {
    fn default() -> Self {
        Self(Self::UNKNOWN.to_string())
    }
}

impl std::fmt::Display for EnvironmentTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unit attached to a metric sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricUnit {
    Milliseconds,
}

impl MetricUnit {
    /// Name as understood by the metrics ingestion service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Milliseconds => "Milliseconds",
        }
    }
}

impl std::fmt::Display for MetricUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which counter store implementation the composition root wires in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    DynamoDb,
    Sqlite,
    Memory,
}

impl StoreBackend {
    /// Parse a backend name, falling back to DynamoDB.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sqlite" => Self::Sqlite,
            "memory" => Self::Memory,
            _ => Self::DynamoDb, // fallback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DynamoDb => "dynamodb",
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

/// Which metrics sink implementation the composition root wires in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkBackend {
    #[default]
    CloudWatch,
    Memory,
}

impl SinkBackend {
    /// Parse a sink name, falling back to CloudWatch.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" => Self::Memory,
            _ => Self::CloudWatch, // fallback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CloudWatch => "cloudwatch",
            Self::Memory => "memory",
        }
    }
}
