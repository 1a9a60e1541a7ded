//! SQS routes under `/queues`.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};

use awsrelay_core::queues::{
    delete_entries, validate_queue_name, ListQueuesOutput, ListQueuesParams, QueueMessagesOutput,
    ReceiveParams, ReceiveQuery,
};
use awsrelay_core::ServiceError;

use super::error::{rejected, RelayError, RelayStyle};
use crate::state::AppState;

fn relay(error: ServiceError) -> RelayError {
    RelayError::new(error, RelayStyle::ErrorObject)
}

/// List SQS queue URLs (GET /queues).
pub async fn list_queues(
    State(state): State<AppState>,
    query: Result<Query<ListQueuesParams>, QueryRejection>,
) -> Result<Json<ListQueuesOutput>, RelayError> {
    let Query(params) = query.map_err(|e| relay(rejected(e)))?;
    let output = state
        .queues
        .list_queues(params.prefix)
        .await
        .map_err(relay)?;

    tracing::debug!(count = output.queue_urls.len(), "Listed queues");

    Ok(Json(output))
}

/// Receive messages from a queue by name (GET /queues/{queueName}).
///
/// With `?delete=true` every received message is deleted in one batch and
/// the batch result is returned under `Deleted`.
pub async fn receive_messages(
    State(state): State<AppState>,
    Path(queue_name): Path<String>,
    query: Result<Query<ReceiveQuery>, QueryRejection>,
) -> Result<Json<QueueMessagesOutput>, RelayError> {
    let Query(query) = query.map_err(|e| relay(rejected(e)))?;
    validate_queue_name(&queue_name).map_err(relay)?;

    let queue_url = state.queues.queue_url(&queue_name).await.map_err(relay)?;

    let params = ReceiveParams {
        max_number_of_messages: state.config.sqs_max_messages,
        wait_time_seconds: state.config.sqs_wait_time_seconds,
    };
    let received = state
        .queues
        .receive_messages(&queue_url, params)
        .await
        .map_err(relay)?;

    tracing::debug!(queue = %queue_url, count = received.messages.len(), "Received messages");

    let entries = delete_entries(&received.messages);
    let deleted = if query.delete && !entries.is_empty() {
        let output = state
            .queues
            .delete_messages(&queue_url, entries)
            .await
            .map_err(relay)?;

        if !output.failed.is_empty() {
            tracing::warn!(
                queue = %queue_url,
                failed = output.failed.len(),
                "Some messages were not deleted"
            );
        }
        Some(output)
    } else {
        None
    };

    Ok(Json(QueueMessagesOutput { received, deleted }))
}
