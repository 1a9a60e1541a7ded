//! SNS routes under `/publish/topics`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use awsrelay_core::topics::{
    publish_params, validate_topic_name, ListTopicsOutput, ListTopicsParams, PublishOutput,
    PublishRequest, Topic, TopicAttributesOutput,
};
use awsrelay_core::ServiceError;

use super::error::{rejected, RelayError, RelayStyle};
use crate::state::AppState;

fn relay(error: ServiceError) -> RelayError {
    RelayError::new(error, RelayStyle::Text)
}

/// Resolve a topic name to its topic, or 404.
async fn resolve(state: &AppState, name: &str) -> Result<Topic, RelayError> {
    validate_topic_name(name).map_err(relay)?;

    state
        .topics
        .find_topic(name)
        .await
        .map_err(relay)?
        .ok_or_else(|| {
            relay(ServiceError::NotFound {
                resource: "Topic",
                id: name.to_string(),
            })
        })
}

/// List SNS topics (GET /publish/topics).
pub async fn list_topics(
    State(state): State<AppState>,
    query: Result<Query<ListTopicsParams>, QueryRejection>,
) -> Result<Json<ListTopicsOutput>, RelayError> {
    let Query(params) = query.map_err(|e| relay(rejected(e)))?;
    let output = state
        .topics
        .list_topics(params.next_token)
        .await
        .map_err(relay)?;

    tracing::debug!(count = output.topics.len(), "Listed topics");

    Ok(Json(output))
}

/// Get a topic's attributes by name (GET /publish/topics/{topicName}).
pub async fn get_topic(
    State(state): State<AppState>,
    Path(topic_name): Path<String>,
) -> Result<Json<TopicAttributesOutput>, RelayError> {
    let topic = resolve(&state, &topic_name).await?;
    let output = state
        .topics
        .topic_attributes(&topic.topic_arn)
        .await
        .map_err(relay)?;

    Ok(Json(output))
}

/// Publish a message to a topic by name (POST /publish/topics/{topicName}).
pub async fn publish(
    State(state): State<AppState>,
    Path(topic_name): Path<String>,
    body: Result<Json<PublishRequest>, JsonRejection>,
) -> Result<Json<PublishOutput>, RelayError> {
    let Json(payload) = body.map_err(|e| relay(rejected(e)))?;
    let params = publish_params(payload).map_err(relay)?;
    let topic = resolve(&state, &topic_name).await?;

    let output = state
        .topics
        .publish(&topic.topic_arn, params)
        .await
        .map_err(relay)?;

    tracing::info!(
        topic = %topic.topic_arn,
        message_id = output.message_id.as_deref().unwrap_or_default(),
        "Published message"
    );

    Ok(Json(output))
}
