//! SDK error mapping.
//!
//! Maps AWS SDK errors to `ServiceError`. Modelled exceptions get a specific
//! variant; anything else is classified by its AWS error code.

use std::error::Error;
use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::list_tables::ListTablesError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_sns::operation::get_topic_attributes::GetTopicAttributesError;
use aws_sdk_sns::operation::list_topics::ListTopicsError;
use aws_sdk_sns::operation::publish::PublishError;
use aws_sdk_sqs::operation::delete_message_batch::DeleteMessageBatchError;
use aws_sdk_sqs::operation::get_queue_url::GetQueueUrlError;
use aws_sdk_sqs::operation::list_queues::ListQueuesError;
use aws_sdk_sqs::operation::receive_message::ReceiveMessageError;

use awsrelay_core::ServiceError;

const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "ThrottledException",
    "RequestThrottled",
    "RequestThrottledException",
    "TooManyRequestsException",
    "ProvisionedThroughputExceededException",
    "RequestLimitExceeded",
];

const ACCESS_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "AuthorizationError",
    "UnrecognizedClientException",
    "InvalidClientTokenId",
    "ExpiredToken",
    "ExpiredTokenException",
    "InvalidSignatureException",
];

const MISSING_QUEUE_CODES: &[&str] = &[
    "QueueDoesNotExist",
    "AWS.SimpleQueueService.NonExistentQueue",
];

// `SdkError` is the same smithy type for every generated client, so the
// DynamoDB re-export serves SNS and SQS as well.
fn transport_failure<E, R>(err: &SdkError<E, R>) -> Option<ServiceError>
where
    E: Error + 'static,
    R: Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => Some(
            ServiceError::Unavailable(DisplayErrorContext(err).to_string()),
        ),
        _ => None,
    }
}

fn has_code<E: ProvideErrorMetadata>(err: &E, codes: &[&str]) -> bool {
    err.code().is_some_and(|code| codes.contains(&code))
}

fn message_of<E: ProvideErrorMetadata + Error>(err: &E) -> String {
    err.message()
        .map(String::from)
        .unwrap_or_else(|| err.to_string())
}

/// Classifies an error no modelled exception matched.
fn classify<E: ProvideErrorMetadata + Error>(operation: &'static str, err: &E) -> ServiceError {
    if has_code(err, THROTTLING_CODES) {
        ServiceError::Throttled(message_of(err))
    } else if has_code(err, ACCESS_CODES) {
        ServiceError::Forbidden(message_of(err))
    } else {
        ServiceError::Upstream {
            operation,
            code: err.code().map(String::from),
            message: message_of(err),
        }
    }
}

// ============================================================================
// DynamoDB
// ============================================================================

/// Map a ListTables SDK error to ServiceError.
pub fn map_list_tables_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ListTablesError, R>,
) -> ServiceError {
    if let Some(failure) = transport_failure(&err) {
        return failure;
    }
    match err.into_service_error() {
        ListTablesError::InternalServerError(_) => {
            ServiceError::upstream("ListTables", "DynamoDB internal server error")
        }
        err => classify("ListTables", &err),
    }
}

/// Map a GetItem SDK error to ServiceError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    table_name: &str,
) -> ServiceError {
    if let Some(failure) = transport_failure(&err) {
        return failure;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => ServiceError::NotFound {
            resource: "Table",
            id: table_name.to_string(),
        },
        GetItemError::ProvisionedThroughputExceededException(_) => {
            ServiceError::Throttled("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            ServiceError::Throttled("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            ServiceError::upstream("GetItem", "DynamoDB internal server error")
        }
        err => classify("GetItem", &err),
    }
}

/// Map a PutItem SDK error to ServiceError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table_name: &str,
) -> ServiceError {
    if let Some(failure) = transport_failure(&err) {
        return failure;
    }
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => ServiceError::NotFound {
            resource: "Table",
            id: table_name.to_string(),
        },
        PutItemError::ProvisionedThroughputExceededException(_) => {
            ServiceError::Throttled("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            ServiceError::Throttled("Request limit exceeded, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            ServiceError::upstream("PutItem", "DynamoDB internal server error")
        }
        err => classify("PutItem", &err),
    }
}

// ============================================================================
// SNS
// ============================================================================

/// Map a ListTopics SDK error to ServiceError.
pub fn map_list_topics_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ListTopicsError, R>,
) -> ServiceError {
    if let Some(failure) = transport_failure(&err) {
        return failure;
    }
    match err.into_service_error() {
        ListTopicsError::AuthorizationErrorException(e) => ServiceError::Forbidden(message_of(&e)),
        ListTopicsError::InvalidParameterException(e) => {
            ServiceError::InvalidInput(message_of(&e))
        }
        err => classify("ListTopics", &err),
    }
}

/// Map a GetTopicAttributes SDK error to ServiceError.
pub fn map_topic_attributes_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetTopicAttributesError, R>,
    topic_arn: &str,
) -> ServiceError {
    if let Some(failure) = transport_failure(&err) {
        return failure;
    }
    match err.into_service_error() {
        GetTopicAttributesError::NotFoundException(_) => ServiceError::NotFound {
            resource: "Topic",
            id: topic_arn.to_string(),
        },
        GetTopicAttributesError::AuthorizationErrorException(e) => {
            ServiceError::Forbidden(message_of(&e))
        }
        GetTopicAttributesError::InvalidParameterException(e) => {
            ServiceError::InvalidInput(message_of(&e))
        }
        err => classify("GetTopicAttributes", &err),
    }
}

/// Map a Publish SDK error to ServiceError.
pub fn map_publish_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PublishError, R>,
    topic_arn: &str,
) -> ServiceError {
    if let Some(failure) = transport_failure(&err) {
        return failure;
    }
    match err.into_service_error() {
        PublishError::NotFoundException(_) => ServiceError::NotFound {
            resource: "Topic",
            id: topic_arn.to_string(),
        },
        PublishError::AuthorizationErrorException(e) => ServiceError::Forbidden(message_of(&e)),
        PublishError::InvalidParameterException(e) => ServiceError::InvalidInput(message_of(&e)),
        PublishError::InvalidParameterValueException(e) => {
            ServiceError::InvalidInput(message_of(&e))
        }
        err => classify("Publish", &err),
    }
}

// ============================================================================
// SQS
// ============================================================================

/// Map a ListQueues SDK error to ServiceError.
pub fn map_list_queues_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ListQueuesError, R>,
) -> ServiceError {
    if let Some(failure) = transport_failure(&err) {
        return failure;
    }
    classify("ListQueues", &err.into_service_error())
}

/// Map a GetQueueUrl SDK error to ServiceError.
pub fn map_queue_url_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetQueueUrlError, R>,
    queue_name: &str,
) -> ServiceError {
    if let Some(failure) = transport_failure(&err) {
        return failure;
    }
    match err.into_service_error() {
        GetQueueUrlError::QueueDoesNotExist(_) => ServiceError::NotFound {
            resource: "Queue",
            id: queue_name.to_string(),
        },
        err => classify("GetQueueUrl", &err),
    }
}

/// Map a ReceiveMessage SDK error to ServiceError.
pub fn map_receive_message_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ReceiveMessageError, R>,
    queue_url: &str,
) -> ServiceError {
    if let Some(failure) = transport_failure(&err) {
        return failure;
    }
    match err.into_service_error() {
        ReceiveMessageError::OverLimit(e) => ServiceError::Throttled(message_of(&e)),
        err if has_code(&err, MISSING_QUEUE_CODES) => ServiceError::NotFound {
            resource: "Queue",
            id: queue_url.to_string(),
        },
        err => classify("ReceiveMessage", &err),
    }
}

/// Map a DeleteMessageBatch SDK error to ServiceError.
pub fn map_delete_message_batch_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteMessageBatchError, R>,
    queue_url: &str,
) -> ServiceError {
    if let Some(failure) = transport_failure(&err) {
        return failure;
    }
    match err.into_service_error() {
        DeleteMessageBatchError::EmptyBatchRequest(e) => ServiceError::InvalidInput(message_of(&e)),
        DeleteMessageBatchError::TooManyEntriesInBatchRequest(e) => {
            ServiceError::InvalidInput(message_of(&e))
        }
        DeleteMessageBatchError::BatchEntryIdsNotDistinct(e) => {
            ServiceError::InvalidInput(message_of(&e))
        }
        DeleteMessageBatchError::InvalidBatchEntryId(e) => {
            ServiceError::InvalidInput(message_of(&e))
        }
        err if has_code(&err, MISSING_QUEUE_CODES) => ServiceError::NotFound {
            resource: "Queue",
            id: queue_url.to_string(),
        },
        err => classify("DeleteMessageBatch", &err),
    }
}
