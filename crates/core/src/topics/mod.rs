//! SNS wire types and topic-name helpers.

mod functions;
mod types;

pub use functions::{find_topic, publish_params, topic_name, validate_topic_name};
pub use types::{
    ListTopicsOutput, ListTopicsParams, PublishOutput, PublishParams, PublishRequest, Topic,
    TopicAttributesOutput,
};
