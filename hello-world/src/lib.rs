//! `hello-world-lambda` is a single Lambda function that serves three event sources.
//!
//! Every invocation enters through [`dispatch::Dispatcher`], which classifies the raw payload by
//! shape and hands it to the matching handler:
//! - [`router`]: API Gateway proxy requests (`/hello`, `/user(s)`)
//! - [`handlers::schedule`]: EventBridge scheduled rules
//! - [`dispatch::RecordProcessor`]: SQS batches
//!
//! Supporting modules:
//! - [`event`]: envelope classification into a typed [`event::InboundEvent`]
//! - [`response`]: the `{statusCode, body}` result every handler returns
//! - [`users`]: the in-memory user store and service
//! - [`config`]: environment-driven settings

pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod handlers;
pub mod response;
pub mod router;
mod serde_ext;
pub mod telemetry;
pub mod users;

pub use dispatch::Dispatcher;
pub use response::Response;
