//! Gateway traits in front of the three AWS services.
//!
//! Each method corresponds to one AWS API call. Implementations convert SDK
//! output into the wire types of this crate and SDK failures into
//! [`ServiceError`](crate::ServiceError).

use async_trait::async_trait;

use crate::dynamo::{
    GetItemOutput, GetItemParams, ListTablesOutput, ListTablesParams, PutItemOutput,
    PutItemParams,
};
use crate::queues::{
    DeleteEntry, DeleteMessageBatchOutput, ListQueuesOutput, ReceiveMessageOutput, ReceiveParams,
};
use crate::topics::{ListTopicsOutput, PublishOutput, PublishParams, Topic, TopicAttributesOutput};
use crate::Result;

/// DynamoDB operations.
#[async_trait]
pub trait TableGateway: Send + Sync {
    /// Lists table names (`ListTables`).
    async fn list_tables(&self, params: ListTablesParams) -> Result<ListTablesOutput>;

    /// Reads one item (`GetItem`).
    async fn get_item(&self, params: GetItemParams) -> Result<GetItemOutput>;

    /// Writes one item (`PutItem`).
    async fn put_item(&self, params: PutItemParams) -> Result<PutItemOutput>;
}

/// SNS operations.
#[async_trait]
pub trait TopicGateway: Send + Sync {
    /// Lists one page of topics (`ListTopics`).
    async fn list_topics(&self, next_token: Option<String>) -> Result<ListTopicsOutput>;

    /// Finds a topic by name across every `ListTopics` page.
    async fn find_topic(&self, name: &str) -> Result<Option<Topic>>;

    /// Reads a topic's attributes (`GetTopicAttributes`).
    async fn topic_attributes(&self, topic_arn: &str) -> Result<TopicAttributesOutput>;

    /// Publishes a message to a topic (`Publish`).
    async fn publish(&self, topic_arn: &str, params: PublishParams) -> Result<PublishOutput>;
}

/// SQS operations.
#[async_trait]
pub trait QueueGateway: Send + Sync {
    /// Lists queue URLs (`ListQueues`).
    async fn list_queues(&self, prefix: Option<String>) -> Result<ListQueuesOutput>;

    /// Resolves a queue name to its URL (`GetQueueUrl`).
    async fn queue_url(&self, name: &str) -> Result<String>;

    /// Receives messages (`ReceiveMessage`).
    async fn receive_messages(
        &self,
        queue_url: &str,
        params: ReceiveParams,
    ) -> Result<ReceiveMessageOutput>;

    /// Deletes received messages (`DeleteMessageBatch`).
    async fn delete_messages(
        &self,
        queue_url: &str,
        entries: Vec<DeleteEntry>,
    ) -> Result<DeleteMessageBatchOutput>;
}
