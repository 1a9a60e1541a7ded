//! SQS gateway.

use async_trait::async_trait;
use aws_sdk_sqs::types::{DeleteMessageBatchRequestEntry, MessageSystemAttributeName};
use aws_sdk_sqs::Client;

use awsrelay_core::queues::{
    DeleteEntry, DeleteMessageBatchOutput, ListQueuesOutput, ReceiveMessageOutput, ReceiveParams,
};
use awsrelay_core::{QueueGateway, Result, ServiceError};

use super::conversions::{batch_error_from_sdk, delete_result_from_sdk, message_from_sdk};
use super::error::{
    map_delete_message_batch_error, map_list_queues_error, map_queue_url_error,
    map_receive_message_error,
};

/// SQS-backed queue gateway.
pub struct SqsGateway {
    client: Client,
}

impl SqsGateway {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QueueGateway for SqsGateway {
    async fn list_queues(&self, prefix: Option<String>) -> Result<ListQueuesOutput> {
        let result = self
            .client
            .list_queues()
            .set_queue_name_prefix(prefix)
            .send()
            .await
            .map_err(map_list_queues_error)?;

        Ok(ListQueuesOutput {
            queue_urls: result.queue_urls.unwrap_or_default(),
            next_token: result.next_token,
        })
    }

    async fn queue_url(&self, name: &str) -> Result<String> {
        let result = self
            .client
            .get_queue_url()
            .queue_name(name)
            .send()
            .await
            .map_err(|e| map_queue_url_error(e, name))?;

        result.queue_url.ok_or_else(|| ServiceError::NotFound {
            resource: "Queue",
            id: name.to_string(),
        })
    }

    async fn receive_messages(
        &self,
        queue_url: &str,
        params: ReceiveParams,
    ) -> Result<ReceiveMessageOutput> {
        let result = self
            .client
            .receive_message()
            .queue_url(queue_url)
            .max_number_of_messages(params.max_number_of_messages)
            .wait_time_seconds(params.wait_time_seconds)
            .message_system_attribute_names(MessageSystemAttributeName::All)
            .message_attribute_names("All")
            .send()
            .await
            .map_err(|e| map_receive_message_error(e, queue_url))?;

        Ok(ReceiveMessageOutput {
            messages: result
                .messages
                .unwrap_or_default()
                .into_iter()
                .map(message_from_sdk)
                .collect(),
        })
    }

    async fn delete_messages(
        &self,
        queue_url: &str,
        entries: Vec<DeleteEntry>,
    ) -> Result<DeleteMessageBatchOutput> {
        let entries = entries
            .into_iter()
            .map(|entry| {
                DeleteMessageBatchRequestEntry::builder()
                    .id(entry.id)
                    .receipt_handle(entry.receipt_handle)
                    .build()
                    .map_err(|e| ServiceError::InvalidInput(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let result = self
            .client
            .delete_message_batch()
            .queue_url(queue_url)
            .set_entries(Some(entries))
            .send()
            .await
            .map_err(|e| map_delete_message_batch_error(e, queue_url))?;

        Ok(DeleteMessageBatchOutput {
            successful: result
                .successful()
                .iter()
                .map(delete_result_from_sdk)
                .collect(),
            failed: result.failed().iter().map(batch_error_from_sdk).collect(),
        })
    }
}
