//! SQS wire types and queue helpers.

mod functions;
mod types;

pub use functions::{delete_entries, queue_name, validate_queue_name};
pub use types::{
    BatchResultErrorEntry, DeleteEntry, DeleteMessageBatchOutput, DeleteResultEntry,
    ListQueuesOutput, ListQueuesParams, Message, MessageAttributeValue, QueueMessagesOutput, ReceiveMessageOutput,
    ReceiveParams, ReceiveQuery,
};
