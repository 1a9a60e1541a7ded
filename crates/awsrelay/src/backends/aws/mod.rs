//! AWS SDK backed gateways.
//!
//! All three clients are built from a single `SdkConfig`, so they share the
//! region, endpoint override and credentials chain.

mod client;
mod conversions;
mod error;
mod queues;
mod tables;
mod topics;

pub use client::{load_sdk_config, target_display};
pub use queues::SqsGateway;
pub use tables::DynamoDbGateway;
pub use topics::SnsGateway;
