//! SNS gateway.

use async_trait::async_trait;
use aws_sdk_sns::Client;

use awsrelay_core::topics::{
    find_topic, ListTopicsOutput, PublishOutput, PublishParams, Topic, TopicAttributesOutput,
};
use awsrelay_core::{Result, TopicGateway};

use super::conversions::topics_from_sdk;
use super::error::{map_list_topics_error, map_publish_error, map_topic_attributes_error};

/// SNS-backed topic gateway.
pub struct SnsGateway {
    client: Client,
}

impl SnsGateway {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TopicGateway for SnsGateway {
    async fn list_topics(&self, next_token: Option<String>) -> Result<ListTopicsOutput> {
        let result = self
            .client
            .list_topics()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(map_list_topics_error)?;

        Ok(ListTopicsOutput {
            topics: topics_from_sdk(result.topics.unwrap_or_default()),
            next_token: result.next_token,
        })
    }

    async fn find_topic(&self, name: &str) -> Result<Option<Topic>> {
        let mut pages = self.client.list_topics().into_paginator().send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(map_list_topics_error)?;
            let topics = topics_from_sdk(page.topics.unwrap_or_default());

            if let Some(topic) = find_topic(&topics, name) {
                return Ok(Some(topic.clone()));
            }
        }

        Ok(None)
    }

    async fn topic_attributes(&self, topic_arn: &str) -> Result<TopicAttributesOutput> {
        let result = self
            .client
            .get_topic_attributes()
            .topic_arn(topic_arn)
            .send()
            .await
            .map_err(|e| map_topic_attributes_error(e, topic_arn))?;

        Ok(TopicAttributesOutput {
            attributes: result.attributes.unwrap_or_default().into_iter().collect(),
        })
    }

    async fn publish(&self, topic_arn: &str, params: PublishParams) -> Result<PublishOutput> {
        let result = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .message(params.message)
            .set_subject(params.subject)
            .set_message_group_id(params.message_group_id)
            .set_message_deduplication_id(params.message_deduplication_id)
            .send()
            .await
            .map_err(|e| map_publish_error(e, topic_arn))?;

        Ok(PublishOutput {
            message_id: result.message_id,
            sequence_number: result.sequence_number,
        })
    }
}
