//! Application state with gateway-based service access.
//!
//! Handlers only see the gateway traits from `awsrelay_core`; which
//! implementation sits behind them is chosen once at startup.

use std::sync::Arc;

use clap::ValueEnum;

use awsrelay_core::{QueueGateway, TableGateway, TopicGateway};

use crate::backends::aws::{load_sdk_config, target_display, DynamoDbGateway, SnsGateway, SqsGateway};
use crate::backends::inmemory::{InMemoryQueues, InMemoryTables, InMemoryTopics};
use crate::config::Config;

/// Which gateway implementation serves the routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Real AWS services through the SDK.
    Aws,
    /// In-process stand-ins, no credentials needed.
    Memory,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Aws => "aws",
            Backend::Memory => "memory",
        }
    }
}

/// Shared application state.
///
/// Cloned for each request handler. The gateways are trait objects so tests
/// can swap in their own implementations.
#[derive(Clone)]
pub struct AppState {
    /// DynamoDB access.
    pub tables: Arc<dyn TableGateway>,
    /// SNS access.
    pub topics: Arc<dyn TopicGateway>,
    /// SQS access.
    pub queues: Arc<dyn QueueGateway>,
    /// Runtime configuration.
    pub config: Arc<Config>,
    /// Backend the gateways belong to.
    pub backend: Backend,
}

impl AppState {
    /// Creates an AppState from explicit gateways.
    pub fn with_gateways(
        tables: Arc<dyn TableGateway>,
        topics: Arc<dyn TopicGateway>,
        queues: Arc<dyn QueueGateway>,
        config: Config,
        backend: Backend,
    ) -> Self {
        Self {
            tables,
            topics,
            queues,
            config: Arc::new(config),
            backend,
        }
    }

    /// Creates AppState for the selected backend.
    pub async fn new(backend: Backend, config: Config) -> Self {
        match backend {
            Backend::Aws => Self::aws(config).await,
            Backend::Memory => Self::in_memory(config).await,
        }
    }

    /// Creates AppState backed by the AWS SDK clients.
    pub async fn aws(config: Config) -> Self {
        let sdk_config = load_sdk_config(&config).await;

        tracing::info!(
            target = %target_display(&config),
            table = %config.table_name,
            "Initialized AWS clients"
        );

        Self::with_gateways(
            Arc::new(DynamoDbGateway::new(aws_sdk_dynamodb::Client::new(&sdk_config))),
            Arc::new(SnsGateway::new(aws_sdk_sns::Client::new(&sdk_config))),
            Arc::new(SqsGateway::new(aws_sdk_sqs::Client::new(&sdk_config))),
            config,
            Backend::Aws,
        )
    }

    /// Creates AppState with in-memory gateways.
    ///
    /// The configured table exists up front, along with the topics and queues
    /// listed in `MEMORY_TOPICS` and `MEMORY_QUEUES`.
    pub async fn in_memory(config: Config) -> Self {
        let tables = InMemoryTables::with_tables([config.table_name.clone()]);
        let topics = InMemoryTopics::new(config.region.clone());
        let queues = InMemoryQueues::new(config.region.clone());

        for name in &config.memory_topics {
            let arn = topics.create_topic(name).await;
            tracing::debug!(topic = %arn, "Created in-memory topic");
        }
        for name in &config.memory_queues {
            let url = queues.create_queue(name).await;
            tracing::debug!(queue = %url, "Created in-memory queue");
        }

        tracing::info!(
            table = %config.table_name,
            topics = config.memory_topics.len(),
            queues = config.memory_queues.len(),
            "Initialized in-memory gateways"
        );

        Self::with_gateways(
            Arc::new(tables),
            Arc::new(topics),
            Arc::new(queues),
            config,
            Backend::Memory,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_seeds_configured_resources() {
        let config = Config {
            memory_topics: vec!["orders".to_string()],
            memory_queues: vec!["jobs".to_string()],
            ..Config::default()
        };
        let state = AppState::in_memory(config).await;

        assert_eq!(state.backend, Backend::Memory);
        assert!(state.topics.find_topic("orders").await.unwrap().is_some());
        assert_eq!(
            state.queues.queue_url("jobs").await.unwrap(),
            "https://sqs.us-west-2.amazonaws.com/000000000000/jobs"
        );
        assert_eq!(
            state
                .tables
                .list_tables(Default::default())
                .await
                .unwrap()
                .table_names,
            vec!["test-coinstar"]
        );
    }
}
