use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::serde::deserialize_optional_string;

/// A topic as listed by `ListTopics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Topic {
    pub topic_arn: String,
}

impl Topic {
    pub fn new(topic_arn: impl Into<String>) -> Self {
        Self {
            topic_arn: topic_arn.into(),
        }
    }
}

/// Response body of `ListTopics`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTopicsOutput {
    pub topics: Vec<Topic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Response body of `GetTopicAttributes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopicAttributesOutput {
    pub attributes: BTreeMap<String, String>,
}

/// Response body of `Publish`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<String>,
}

/// Query parameters accepted by `GET /publish/topics`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTopicsParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub next_token: Option<String>,
}

/// JSON body of `POST /publish/topics/{topicName}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub message_group_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub message_deduplication_id: Option<String>,
}

/// Parameters for a `Publish` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishParams {
    pub message: String,
    pub subject: Option<String>,
    pub message_group_id: Option<String>,
    pub message_deduplication_id: Option<String>,
}
