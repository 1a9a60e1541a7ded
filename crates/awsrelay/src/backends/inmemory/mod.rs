//! In-memory gateway implementations.
//!
//! These mimic the observable behaviour of the AWS APIs closely enough for
//! route tests and credential-free local runs. Data lives in
//! `Arc<RwLock<_>>` maps and is lost when the gateway is dropped.

mod queues;
mod tables;
mod topics;

pub use queues::InMemoryQueues;
pub use tables::InMemoryTables;
pub use topics::InMemoryTopics;

/// Account id used in fabricated ARNs and queue URLs.
pub const ACCOUNT_ID: &str = "000000000000";
