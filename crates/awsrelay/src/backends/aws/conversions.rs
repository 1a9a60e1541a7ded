//! Conversions between SDK types and the wire types relayed to callers.

use std::collections::{BTreeMap, HashMap};

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types as dynamodb;
use aws_sdk_sns::types as sns;
use aws_sdk_sqs::types as sqs;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use awsrelay_core::dynamo::{
    AttributeValue, ConsumedCapacity, Item, ItemCollectionMetrics, ReturnConsumedCapacity,
    ReturnItemCollectionMetrics,
};
use awsrelay_core::queues::{
    BatchResultErrorEntry, DeleteResultEntry, Message, MessageAttributeValue,
};
use awsrelay_core::topics::Topic;
use awsrelay_core::ServiceError;

// ============================================================================
// DynamoDB
// ============================================================================

/// Convert an SDK attribute value to its JSON tagged form.
pub fn attribute_from_sdk(value: dynamodb::AttributeValue) -> Result<AttributeValue, ServiceError> {
    Ok(match value {
        dynamodb::AttributeValue::S(s) => AttributeValue::S(s),
        dynamodb::AttributeValue::N(n) => AttributeValue::N(n),
        dynamodb::AttributeValue::B(blob) => AttributeValue::B(STANDARD.encode(blob.as_ref())),
        dynamodb::AttributeValue::Ss(values) => AttributeValue::Ss(values),
        dynamodb::AttributeValue::Ns(values) => AttributeValue::Ns(values),
        dynamodb::AttributeValue::Bs(blobs) => AttributeValue::Bs(
            blobs
                .iter()
                .map(|blob| STANDARD.encode(blob.as_ref()))
                .collect(),
        ),
        dynamodb::AttributeValue::M(map) => AttributeValue::M(item_from_sdk(map)?),
        dynamodb::AttributeValue::L(values) => AttributeValue::L(
            values
                .into_iter()
                .map(attribute_from_sdk)
                .collect::<Result<_, _>>()?,
        ),
        dynamodb::AttributeValue::Null(null) => AttributeValue::Null(null),
        dynamodb::AttributeValue::Bool(b) => AttributeValue::Bool(b),
        other => {
            return Err(ServiceError::upstream(
                "DecodeAttribute",
                format!("unsupported attribute value: {other:?}"),
            ))
        }
    })
}

/// Convert a JSON tagged attribute value to the SDK type.
pub fn attribute_to_sdk(value: AttributeValue) -> Result<dynamodb::AttributeValue, ServiceError> {
    Ok(match value {
        AttributeValue::S(s) => dynamodb::AttributeValue::S(s),
        AttributeValue::N(n) => dynamodb::AttributeValue::N(n),
        AttributeValue::B(encoded) => dynamodb::AttributeValue::B(decode_blob(&encoded)?),
        AttributeValue::Ss(values) => dynamodb::AttributeValue::Ss(values),
        AttributeValue::Ns(values) => dynamodb::AttributeValue::Ns(values),
        AttributeValue::Bs(values) => dynamodb::AttributeValue::Bs(
            values
                .iter()
                .map(|encoded| decode_blob(encoded))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => dynamodb::AttributeValue::M(item_to_sdk(map)?),
        AttributeValue::L(values) => dynamodb::AttributeValue::L(
            values
                .into_iter()
                .map(attribute_to_sdk)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Null(null) => dynamodb::AttributeValue::Null(null),
        AttributeValue::Bool(b) => dynamodb::AttributeValue::Bool(b),
    })
}

fn decode_blob(encoded: &str) -> Result<Blob, ServiceError> {
    STANDARD
        .decode(encoded)
        .map(Blob::new)
        .map_err(|e| ServiceError::InvalidInput(format!("invalid base64 binary value: {e}")))
}

/// Convert an SDK item.
pub fn item_from_sdk(
    item: HashMap<String, dynamodb::AttributeValue>,
) -> Result<Item, ServiceError> {
    item.into_iter()
        .map(|(name, value)| attribute_from_sdk(value).map(|value| (name, value)))
        .collect()
}

/// Convert an item to the SDK type.
pub fn item_to_sdk(item: Item) -> Result<HashMap<String, dynamodb::AttributeValue>, ServiceError> {
    item.into_iter()
        .map(|(name, value)| attribute_to_sdk(value).map(|value| (name, value)))
        .collect()
}

pub fn consumed_capacity_from_sdk(capacity: dynamodb::ConsumedCapacity) -> ConsumedCapacity {
    ConsumedCapacity {
        table_name: capacity.table_name,
        capacity_units: capacity.capacity_units,
        read_capacity_units: capacity.read_capacity_units,
        write_capacity_units: capacity.write_capacity_units,
    }
}

pub fn item_collection_metrics_from_sdk(
    metrics: dynamodb::ItemCollectionMetrics,
) -> Result<ItemCollectionMetrics, ServiceError> {
    Ok(ItemCollectionMetrics {
        item_collection_key: metrics.item_collection_key.map(item_from_sdk).transpose()?,
        size_estimate_range_gb: metrics.size_estimate_range_gb.unwrap_or_default(),
    })
}

pub fn return_consumed_capacity_to_sdk(
    option: ReturnConsumedCapacity,
) -> dynamodb::ReturnConsumedCapacity {
    match option {
        ReturnConsumedCapacity::Total => dynamodb::ReturnConsumedCapacity::Total,
        ReturnConsumedCapacity::Indexes => dynamodb::ReturnConsumedCapacity::Indexes,
        ReturnConsumedCapacity::None => dynamodb::ReturnConsumedCapacity::None,
    }
}

pub fn return_item_collection_metrics_to_sdk(
    option: ReturnItemCollectionMetrics,
) -> dynamodb::ReturnItemCollectionMetrics {
    match option {
        ReturnItemCollectionMetrics::Size => dynamodb::ReturnItemCollectionMetrics::Size,
        ReturnItemCollectionMetrics::None => dynamodb::ReturnItemCollectionMetrics::None,
    }
}

// ============================================================================
// SNS
// ============================================================================

/// Convert listed topics, dropping entries without an ARN.
pub fn topics_from_sdk(topics: Vec<sns::Topic>) -> Vec<Topic> {
    topics
        .into_iter()
        .filter_map(|topic| topic.topic_arn.map(Topic::new))
        .collect()
}

// ============================================================================
// SQS
// ============================================================================

pub fn message_from_sdk(message: sqs::Message) -> Message {
    let attributes: BTreeMap<String, String> = message
        .attributes
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| (name.as_str().to_string(), value))
        .collect();

    let message_attributes: BTreeMap<String, MessageAttributeValue> = message
        .message_attributes
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| (name, message_attribute_from_sdk(value)))
        .collect();

    Message {
        message_id: message.message_id,
        receipt_handle: message.receipt_handle,
        md5_of_body: message.md5_of_body,
        body: message.body,
        attributes,
        md5_of_message_attributes: message.md5_of_message_attributes,
        message_attributes,
    }
}

pub fn message_attribute_from_sdk(value: sqs::MessageAttributeValue) -> MessageAttributeValue {
    MessageAttributeValue {
        data_type: value.data_type,
        string_value: value.string_value,
        binary_value: value.binary_value.map(|blob| STANDARD.encode(blob.as_ref())),
        string_list_values: value.string_list_values.unwrap_or_default(),
        binary_list_values: value
            .binary_list_values
            .unwrap_or_default()
            .iter()
            .map(|blob| STANDARD.encode(blob.as_ref()))
            .collect(),
    }
}

pub fn delete_result_from_sdk(entry: &sqs::DeleteMessageBatchResultEntry) -> DeleteResultEntry {
    DeleteResultEntry {
        id: entry.id().to_string(),
    }
}

pub fn batch_error_from_sdk(entry: &sqs::BatchResultErrorEntry) -> BatchResultErrorEntry {
    BatchResultErrorEntry {
        id: entry.id().to_string(),
        sender_fault: entry.sender_fault(),
        code: entry.code().to_string(),
        message: entry.message().map(String::from),
    }
}
