use crate::error::ServiceError;

use super::types::{DeleteEntry, Message};

/// Longest queue name SQS accepts.
const MAX_QUEUE_NAME_LEN: usize = 80;

/// Returns the queue name at the end of a queue URL.
///
/// `https://sqs.us-west-2.amazonaws.com/123456789012/jobs` -> `jobs`
pub fn queue_name(queue_url: &str) -> &str {
    queue_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(queue_url)
}

/// Rejects names SQS could never have created.
pub fn validate_queue_name(name: &str) -> Result<(), ServiceError> {
    if name.is_empty() || name.len() > MAX_QUEUE_NAME_LEN || name.contains('/') {
        return Err(ServiceError::InvalidInput(format!(
            "invalid queue name: {name:?}"
        )));
    }
    Ok(())
}

/// Builds `DeleteMessageBatch` entries for received messages.
///
/// Entry ids are the message's position in the received list, so a failed
/// entry can be traced back to its message. Messages without a receipt
/// handle can't be deleted and are skipped.
pub fn delete_entries(messages: &[Message]) -> Vec<DeleteEntry> {
    messages
        .iter()
        .enumerate()
        .filter_map(|(idx, message)| {
            message.receipt_handle.as_ref().map(|handle| DeleteEntry {
                id: idx.to_string(),
                receipt_handle: handle.clone(),
            })
        })
        .collect()
}
