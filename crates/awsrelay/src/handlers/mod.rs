pub mod error;
pub mod health;
pub mod queues;
pub mod tables;
pub mod topics;
