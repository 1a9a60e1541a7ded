use std::{env, time::Duration};

use thiserror::Error;

use awsrelay_core::dynamo::DEFAULT_TABLE_NAME;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    NotANumber { key: &'static str, value: String },
    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// DynamoDB table behind `/dynamo-test` (default: "test-coinstar")
    pub table_name: String,
    /// AWS region (default: "us-west-2")
    pub region: String,
    /// Custom endpoint for every AWS client, e.g. LocalStack
    pub endpoint_url: Option<String>,
    /// Shared credentials profile, reported at startup (default: "default")
    pub aws_profile: String,
    /// `MaxNumberOfMessages` for SQS receives (default: 10)
    pub sqs_max_messages: i32,
    /// `WaitTimeSeconds` for SQS receives (default: 0)
    pub sqs_wait_time_seconds: i32,
    /// Per-request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
    /// Topics created at startup by the in-memory backend
    pub memory_topics: Vec<String>,
    /// Queues created at startup by the in-memory backend
    pub memory_queues: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - DynamoDB table (default: "test-coinstar")
    /// - `AWS_REGION` - AWS region (default: "us-west-2")
    /// - `AWS_ENDPOINT_URL` - Custom AWS endpoint (default: unset)
    /// - `AWS_PROFILE` - Credentials profile (default: "default")
    /// - `SQS_MAX_MESSAGES` - Messages per receive, 1..=10 (default: 10)
    /// - `SQS_WAIT_TIME_SECONDS` - Long-poll wait, 0..=20 (default: 0)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout, 1..=300 (default: 30)
    /// - `MEMORY_TOPICS` - Comma-separated topics for `--backend memory`
    /// - `MEMORY_QUEUES` - Comma-separated queues for `--backend memory`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            table_name: non_blank("DYNAMODB_TABLE_NAME")
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            region: non_blank("AWS_REGION").unwrap_or_else(|| "us-west-2".to_string()),
            endpoint_url: non_blank("AWS_ENDPOINT_URL"),
            aws_profile: non_blank("AWS_PROFILE").unwrap_or_else(|| "default".to_string()),
            sqs_max_messages: bounded(&non_blank, "SQS_MAX_MESSAGES", 10, 1, 10)? as i32,
            sqs_wait_time_seconds: bounded(&non_blank, "SQS_WAIT_TIME_SECONDS", 0, 0, 20)? as i32,
            request_timeout_seconds: bounded(&non_blank, "REQUEST_TIMEOUT_SECONDS", 30, 1, 300)?
                as u64,
            memory_topics: name_list(non_blank("MEMORY_TOPICS")),
            memory_queues: name_list(non_blank("MEMORY_QUEUES")),
        })
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            region: "us-west-2".to_string(),
            endpoint_url: None,
            aws_profile: "default".to_string(),
            sqs_max_messages: 10,
            sqs_wait_time_seconds: 0,
            request_timeout_seconds: 30,
            memory_topics: Vec::new(),
            memory_queues: Vec::new(),
        }
    }
}

fn name_list(raw: Option<String>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Reads an integer variable, falling back to `default` and enforcing `min..=max`.
fn bounded<F>(
    lookup: &F,
    key: &'static str,
    default: i64,
    min: i64,
    max: i64,
) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let value: i64 = raw.trim().parse().map_err(|_| ConfigError::NotANumber {
        key,
        value: raw.clone(),
    })?;

    if !(min..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            key,
            value,
            min,
            max,
        });
    }

    Ok(value)
}
