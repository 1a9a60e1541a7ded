use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use awsrelay_core::topics::{
    find_topic, topic_name, ListTopicsOutput, PublishOutput, PublishParams, Topic,
    TopicAttributesOutput,
};
use awsrelay_core::{Result, ServiceError, TopicGateway};

use super::ACCOUNT_ID;

/// Topics per `ListTopics` page.
const PAGE_SIZE: usize = 100;
/// Published messages kept per topic; older ones are dropped.
const RECORDED_MESSAGES: usize = 100;

#[derive(Debug, Default)]
struct TopicState {
    published: VecDeque<PublishParams>,
    sequence: u64,
}

/// In-memory SNS topics that keep the latest messages published to them.
#[derive(Debug, Clone)]
pub struct InMemoryTopics {
    region: String,
    topics: Arc<RwLock<BTreeMap<String, TopicState>>>,
}

impl InMemoryTopics {
    /// Creates an empty gateway fabricating ARNs in `region`.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            topics: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Creates a topic and returns its ARN. Creating an existing topic is a no-op.
    pub async fn create_topic(&self, name: &str) -> String {
        let arn = format!("arn:aws:sns:{}:{ACCOUNT_ID}:{name}", self.region);
        self.topics.write().await.entry(arn.clone()).or_default();
        arn
    }

    #[cfg(test)]
    /// Recent messages published to `topic_arn`, oldest first.
    pub async fn published(&self, topic_arn: &str) -> Vec<PublishParams> {
        self.topics
            .read()
            .await
            .get(topic_arn)
            .map(|state| state.published.iter().cloned().collect())
            .unwrap_or_default()
    }
}

fn topic_not_found(topic_arn: &str) -> ServiceError {
    ServiceError::NotFound {
        resource: "Topic",
        id: topic_arn.to_string(),
    }
}

#[async_trait]
impl TopicGateway for InMemoryTopics {
    async fn list_topics(&self, next_token: Option<String>) -> Result<ListTopicsOutput> {
        let start = match next_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| ServiceError::InvalidInput(format!("invalid NextToken: {token}")))?,
            None => 0,
        };

        let topics = self.topics.read().await;
        let page: Vec<Topic> = topics
            .keys()
            .skip(start)
            .take(PAGE_SIZE)
            .cloned()
            .map(Topic::new)
            .collect();

        let next = start + page.len();
        Ok(ListTopicsOutput {
            topics: page,
            next_token: (next < topics.len()).then(|| next.to_string()),
        })
    }

    async fn find_topic(&self, name: &str) -> Result<Option<Topic>> {
        let topics: Vec<Topic> = self.topics.read().await.keys().cloned().map(Topic::new).collect();
        Ok(find_topic(&topics, name).cloned())
    }

    async fn topic_attributes(&self, topic_arn: &str) -> Result<TopicAttributesOutput> {
        let topics = self.topics.read().await;
        if !topics.contains_key(topic_arn) {
            return Err(topic_not_found(topic_arn));
        }

        let name = topic_name(topic_arn);
        let attributes = BTreeMap::from([
            ("TopicArn".to_string(), topic_arn.to_string()),
            ("Owner".to_string(), ACCOUNT_ID.to_string()),
            ("DisplayName".to_string(), String::new()),
            ("SubscriptionsConfirmed".to_string(), "0".to_string()),
            ("SubscriptionsPending".to_string(), "0".to_string()),
            ("SubscriptionsDeleted".to_string(), "0".to_string()),
            (
                "FifoTopic".to_string(),
                name.ends_with(".fifo").to_string(),
            ),
        ]);

        Ok(TopicAttributesOutput { attributes })
    }

    async fn publish(&self, topic_arn: &str, params: PublishParams) -> Result<PublishOutput> {
        let fifo = topic_name(topic_arn).ends_with(".fifo");
        if fifo && params.message_group_id.is_none() {
            return Err(ServiceError::InvalidInput(
                "The MessageGroupId parameter is required for FIFO topics".to_string(),
            ));
        }

        let mut topics = self.topics.write().await;
        let state = topics
            .get_mut(topic_arn)
            .ok_or_else(|| topic_not_found(topic_arn))?;

        if state.published.len() == RECORDED_MESSAGES {
            state.published.pop_front();
        }
        state.published.push_back(params);
        state.sequence += 1;

        Ok(PublishOutput {
            message_id: Some(Uuid::new_v4().to_string()),
            sequence_number: fifo.then(|| format!("{:020}", state.sequence)),
        })
    }
}
