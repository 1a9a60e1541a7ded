//! Parameter objects for the DynamoDB routes.
//!
//! The routes only ever touch one table, keyed by `guid`, carrying a single
//! `graph_id` attribute. These functions turn caller input into the exact
//! parameter sets sent to DynamoDB.

use serde::Deserialize;

use crate::error::ServiceError;
use crate::serde::deserialize_optional_string;

use super::types::{AttributeValue, Item};

/// Table used when `DYNAMODB_TABLE_NAME` is not set.
pub const DEFAULT_TABLE_NAME: &str = "test-coinstar";
/// Partition key attribute.
pub const KEY_ATTRIBUTE: &str = "guid";
/// The one attribute read back and written besides the key.
pub const GRAPH_ID_ATTRIBUTE: &str = "graph_id";
/// Stored when a write carries no graph id.
pub const MISSING_GRAPH_ID: &str = "NONE";

/// `ReturnConsumedCapacity` request option.
///
/// The whole DynamoDB option set, so gateway parameters can describe any
/// `GetItem`/`PutItem`. The routes send `Total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnConsumedCapacity {
    Total,
    Indexes,
    None,
}

/// `ReturnItemCollectionMetrics` request option. The routes send `Size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnItemCollectionMetrics {
    Size,
    None,
}

/// Query parameters accepted by `GET /dynamo-test/tables`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTablesParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub exclusive_start_table_name: Option<String>,
    #[serde(default)]
    pub limit: Option<i32>,
}

/// Parameters for a `GetItem` call.
#[derive(Debug, Clone, PartialEq)]
pub struct GetItemParams {
    pub table_name: String,
    pub key: Item,
    pub attributes_to_get: Vec<String>,
    pub consistent_read: bool,
    pub return_consumed_capacity: ReturnConsumedCapacity,
}

/// Parameters for a `PutItem` call.
#[derive(Debug, Clone, PartialEq)]
pub struct PutItemParams {
    pub table_name: String,
    pub item: Item,
    pub return_consumed_capacity: ReturnConsumedCapacity,
    pub return_item_collection_metrics: ReturnItemCollectionMetrics,
}

/// JSON body of `PUT /dynamo-test`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutGraphRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub guid: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub graph_id: Option<String>,
}

/// Builds the eventually consistent `GetItem` that reads `graph_id` for `guid`.
pub fn graph_lookup(table_name: &str, guid: &str) -> Result<GetItemParams, ServiceError> {
    if guid.trim().is_empty() {
        return Err(ServiceError::InvalidInput("guid is required".to_string()));
    }

    Ok(GetItemParams {
        table_name: table_name.to_string(),
        key: Item::from([(KEY_ATTRIBUTE.to_string(), AttributeValue::S(guid.to_string()))]),
        attributes_to_get: vec![GRAPH_ID_ATTRIBUTE.to_string()],
        consistent_read: false,
        return_consumed_capacity: ReturnConsumedCapacity::Total,
    })
}

/// Builds the `PutItem` storing `graph_id` under `guid`.
///
/// A request without a graph id stores [`MISSING_GRAPH_ID`].
pub fn graph_record(
    table_name: &str,
    request: PutGraphRequest,
) -> Result<PutItemParams, ServiceError> {
    let guid = request
        .guid
        .ok_or_else(|| ServiceError::InvalidInput("guid is required".to_string()))?;
    let graph_id = request
        .graph_id
        .unwrap_or_else(|| MISSING_GRAPH_ID.to_string());

    Ok(PutItemParams {
        table_name: table_name.to_string(),
        item: Item::from([
            (KEY_ATTRIBUTE.to_string(), AttributeValue::S(guid)),
            (GRAPH_ID_ATTRIBUTE.to_string(), AttributeValue::S(graph_id)),
        ]),
        return_consumed_capacity: ReturnConsumedCapacity::Total,
        return_item_collection_metrics: ReturnItemCollectionMetrics::Size,
    })
}
