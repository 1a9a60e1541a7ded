use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use awsrelay_core::queues::{
    queue_name, BatchResultErrorEntry, DeleteEntry, DeleteMessageBatchOutput, DeleteResultEntry,
    ListQueuesOutput, Message, ReceiveMessageOutput, ReceiveParams,
};
use awsrelay_core::{QueueGateway, Result, ServiceError};

use super::ACCOUNT_ID;

/// Most entries SQS accepts in one batch request.
const MAX_BATCH_ENTRIES: usize = 10;

#[derive(Debug, Clone)]
struct StoredMessage {
    message_id: String,
    body: String,
    receive_count: u32,
}

#[derive(Debug, Default)]
struct QueueState {
    visible: VecDeque<StoredMessage>,
    in_flight: HashMap<String, StoredMessage>,
}

/// In-memory SQS queues.
///
/// Received messages stay in flight until deleted; there is no visibility
/// timeout returning them to the queue.
#[derive(Debug, Clone)]
pub struct InMemoryQueues {
    region: String,
    queues: Arc<RwLock<BTreeMap<String, QueueState>>>,
}

impl InMemoryQueues {
    /// Creates an empty gateway fabricating queue URLs in `region`.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            queues: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    fn url_for(&self, name: &str) -> String {
        format!("https://sqs.{}.amazonaws.com/{ACCOUNT_ID}/{name}", self.region)
    }

    /// Creates a queue and returns its URL. Creating an existing queue is a no-op.
    pub async fn create_queue(&self, name: &str) -> String {
        self.queues
            .write()
            .await
            .entry(name.to_string())
            .or_default();
        self.url_for(name)
    }

    #[cfg(test)]
    /// Enqueues a message body, returning its message id.
    pub async fn send_message(&self, name: &str, body: impl Into<String>) -> Result<String> {
        let mut queues = self.queues.write().await;
        let queue = queues.get_mut(name).ok_or_else(|| queue_not_found(name))?;

        let message_id = Uuid::new_v4().to_string();
        queue.visible.push_back(StoredMessage {
            message_id: message_id.clone(),
            body: body.into(),
            receive_count: 0,
        });
        Ok(message_id)
    }

    #[cfg(test)]
    /// Visible plus in-flight messages in `name`.
    pub async fn depth(&self, name: &str) -> Option<usize> {
        self.queues
            .read()
            .await
            .get(name)
            .map(|queue| queue.visible.len() + queue.in_flight.len())
    }

    /// Resolves a URL minted by this gateway back to its queue name.
    fn name_for_url<'a>(&self, queue_url: &'a str) -> Result<&'a str> {
        let name = queue_name(queue_url);
        if self.url_for(name) == queue_url {
            Ok(name)
        } else {
            Err(queue_not_found(queue_url))
        }
    }
}

fn queue_not_found(id: &str) -> ServiceError {
    ServiceError::NotFound {
        resource: "Queue",
        id: id.to_string(),
    }
}

fn validate_batch(entries: &[DeleteEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(ServiceError::InvalidInput(
            "There should be at least one DeleteMessageBatchRequestEntry in the request"
                .to_string(),
        ));
    }
    if entries.len() > MAX_BATCH_ENTRIES {
        return Err(ServiceError::InvalidInput(format!(
            "Maximum number of entries per request are {MAX_BATCH_ENTRIES}"
        )));
    }
    let mut ids = HashSet::new();
    if !entries.iter().all(|entry| ids.insert(entry.id.as_str())) {
        return Err(ServiceError::InvalidInput(
            "Two or more batch entries in the request have the same Id".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl QueueGateway for InMemoryQueues {
    async fn list_queues(&self, prefix: Option<String>) -> Result<ListQueuesOutput> {
        let queues = self.queues.read().await;
        let queue_urls = queues
            .keys()
            .filter(|name| prefix.as_deref().is_none_or(|p| name.starts_with(p)))
            .map(|name| self.url_for(name))
            .collect();

        Ok(ListQueuesOutput {
            queue_urls,
            next_token: None,
        })
    }

    async fn queue_url(&self, name: &str) -> Result<String> {
        if self.queues.read().await.contains_key(name) {
            Ok(self.url_for(name))
        } else {
            Err(queue_not_found(name))
        }
    }

    async fn receive_messages(
        &self,
        queue_url: &str,
        params: ReceiveParams,
    ) -> Result<ReceiveMessageOutput> {
        let name = self.name_for_url(queue_url)?;
        let mut queues = self.queues.write().await;
        let queue = queues
            .get_mut(name)
            .ok_or_else(|| queue_not_found(queue_url))?;

        let count = usize::try_from(params.max_number_of_messages).unwrap_or(0);
        let mut messages = Vec::new();

        while messages.len() < count {
            let Some(mut stored) = queue.visible.pop_front() else {
                break;
            };
            stored.receive_count += 1;

            let receipt_handle = Uuid::new_v4().to_string();
            messages.push(Message {
                message_id: Some(stored.message_id.clone()),
                receipt_handle: Some(receipt_handle.clone()),
                md5_of_body: None,
                body: Some(stored.body.clone()),
                attributes: BTreeMap::from([(
                    "ApproximateReceiveCount".to_string(),
                    stored.receive_count.to_string(),
                )]),
                ..Default::default()
            });
            queue.in_flight.insert(receipt_handle, stored);
        }

        Ok(ReceiveMessageOutput { messages })
    }

    async fn delete_messages(
        &self,
        queue_url: &str,
        entries: Vec<DeleteEntry>,
    ) -> Result<DeleteMessageBatchOutput> {
        validate_batch(&entries)?;

        let name = self.name_for_url(queue_url)?;
        let mut queues = self.queues.write().await;
        let queue = queues
            .get_mut(name)
            .ok_or_else(|| queue_not_found(queue_url))?;

        let mut output = DeleteMessageBatchOutput::default();
        for entry in entries {
            if queue.in_flight.remove(&entry.receipt_handle).is_some() {
                output.successful.push(DeleteResultEntry { id: entry.id });
            } else {
                output.failed.push(BatchResultErrorEntry {
                    id: entry.id,
                    sender_fault: true,
                    code: "ReceiptHandleIsInvalid".to_string(),
                    message: Some(format!(
                        "The receipt handle \"{}\" is not valid.",
                        entry.receipt_handle
                    )),
                });
            }
        }

        Ok(output)
    }
}
