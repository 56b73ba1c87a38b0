//! DynamoDB Counter Store
//!
//! Implements CounterStore with a single `UpdateItem` call using an
//! `ADD` update expression, so the increment is atomic on the server and
//! the new value comes back in the same round trip.

use crate::domain::entities::VisitorCount;
use crate::domain::errors::StoreError;
use crate::domain::ports::CounterStore;
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;

/// Partition key attribute of the counter table.
pub const PARTITION_KEY: &str = "id";

/// DynamoDB-backed counter store.
#[derive(Clone)]
pub struct DynamoDbCounterStore {
    client: Client,
    table_name: String,
    attribute: String,
}

impl DynamoDbCounterStore {
    /// Create a store for `table_name`, counting in `attribute`.
    pub fn new(client: Client, table_name: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            attribute: attribute.into(),
        }
    }
}

/// Pull the post-increment value out of `UpdateItem`'s returned attributes.
fn parse_count(
    attributes: Option<&HashMap<String, AttributeValue>>,
    attribute: &str,
) -> Result<VisitorCount, StoreError> {
    let value = attributes
        .and_then(|a| a.get(attribute))
        .ok_or_else(|| StoreError::MalformedResponse(format!("missing attribute {}", attribute)))?;

    let number = value.as_n().map_err(|_| {
        StoreError::MalformedResponse(format!("attribute {} is not a number", attribute))
    })?;

    number.parse::<i64>().map(VisitorCount).map_err(|e| {
        StoreError::MalformedResponse(format!("attribute {}={}: {}", attribute, number, e))
    })
}

#[async_trait]
impl CounterStore for DynamoDbCounterStore {
    #[tracing::instrument(name = "dynamodb.update_item", skip(self), fields(table = %self.table_name))]
    async fn increment(&self, counter_id: &str, delta: i64) -> Result<VisitorCount, StoreError> {
        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(counter_id.to_string()))
            .update_expression("ADD #count :inc")
            .expression_attribute_names("#count", &self.attribute)
            .expression_attribute_values(":inc", AttributeValue::N(delta.to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|e| StoreError::Backend(DisplayErrorContext(&e).to_string()))?;

        parse_count(output.attributes(), &self.attribute)
    }
}
