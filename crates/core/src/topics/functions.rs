//! Pure helpers for addressing topics by name.
//!
//! Callers address topics by name while SNS wants ARNs, so the routes list
//! topics and pick the one whose ARN ends in `:<name>`.

use crate::error::ServiceError;

use super::types::{PublishParams, PublishRequest, Topic};

/// Longest topic name SNS accepts.
const MAX_TOPIC_NAME_LEN: usize = 256;

/// Returns the name segment of a topic ARN.
///
/// `arn:aws:sns:us-west-2:123456789012:orders` -> `orders`
pub fn topic_name(topic_arn: &str) -> &str {
    topic_arn.rsplit(':').next().unwrap_or(topic_arn)
}

/// Finds the topic whose ARN names `name`.
pub fn find_topic<'a>(topics: &'a [Topic], name: &str) -> Option<&'a Topic> {
    topics.iter().find(|topic| topic_name(&topic.topic_arn) == name)
}

/// Rejects names SNS could never have created.
pub fn validate_topic_name(name: &str) -> Result<(), ServiceError> {
    if name.is_empty() || name.len() > MAX_TOPIC_NAME_LEN || name.contains(':') {
        return Err(ServiceError::InvalidInput(format!(
            "invalid topic name: {name:?}"
        )));
    }
    Ok(())
}

/// Turns a publish body into `Publish` parameters.
pub fn publish_params(request: PublishRequest) -> Result<PublishParams, ServiceError> {
    let message = request
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ServiceError::InvalidInput("message is required".to_string()))?;

    Ok(PublishParams {
        message,
        subject: request.subject,
        message_group_id: request.message_group_id,
        message_deduplication_id: request.message_deduplication_id,
    })
}
