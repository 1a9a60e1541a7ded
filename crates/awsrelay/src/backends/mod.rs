//! Gateway implementations.
//!
//! - `aws`: the real DynamoDB, SNS and SQS clients.
//! - `inmemory`: in-process stand-ins for tests and credential-free local runs.

pub mod aws;
pub mod inmemory;
