//! Functional core for awsrelay.
//!
//! Pure data types mirroring the AWS JSON wire shapes, the error taxonomy
//! shared by every route, and the gateway traits the server's backends
//! implement. Nothing in this crate performs I/O.

pub mod dynamo;
pub mod error;
pub mod gateway;
pub mod http_mapping;
pub mod queues;
pub mod serde;
pub mod topics;

pub use error::{Result, ServiceError};
pub use gateway::{QueueGateway, TableGateway, TopicGateway};
pub use http_mapping::service_error_to_status_code;
