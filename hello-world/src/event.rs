//! Inbound envelope classification.
//!
//! Lambda hands the function one untagged JSON document per invocation. The shape decides what it
//! is, checked in a fixed order:
//! 1. `httpMethod` and `path` present: API Gateway proxy request
//! 2. `source == "aws.events"`: EventBridge scheduled rule
//! 3. non-empty `Records` whose first entry has `eventSource == "aws:sqs"`: SQS batch
//! 4. anything else is unsupported

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::serde_ext::{de_scalar_map, de_string_or_empty};

/// `source` value carried by EventBridge scheduled events.
pub const SCHEDULE_SOURCE: &str = "aws.events";

/// `eventSource` value carried by SQS records.
pub const SQS_EVENT_SOURCE: &str = "aws:sqs";

/// API Gateway (REST, proxy integration) request fields the router looks at.
///
/// Only `path` must have the proxy type. A non-string `httpMethod` decodes as empty and matches no
/// route, parameter values are stringified and `body` is kept as whatever JSON it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    pub path: String,
    #[serde(deserialize_with = "de_string_or_empty")]
    pub http_method: String,
    #[serde(default, deserialize_with = "de_scalar_map")]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default, deserialize_with = "de_scalar_map")]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            http_method: method.into(),
            ..Self::default()
        }
    }

    pub fn with_path_parameter(mut self, name: &str, value: &str) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_query_parameter(mut self, name: &str, value: &str) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Sets a string body, as API Gateway sends it.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Value::String(body.into()));
        self
    }

    pub fn with_json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }
}

/// EventBridge scheduled event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTrigger {
    pub source: String,
    /// Rule ARNs; non-string entries are dropped.
    pub resources: Vec<String>,
}

/// One SQS record. `body` is expected (not guaranteed) to be JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecord {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub event_source: Option<String>,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchMessage {
    pub records: Vec<BatchRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Http(HttpRequest),
    Scheduled(ScheduledTrigger),
    Batch(BatchMessage),
    Unknown,
}

#[derive(Debug, Deserialize)]
struct BatchEnvelope {
    #[serde(rename = "Records")]
    records: Vec<BatchRecord>,
}

impl InboundEvent {
    /// Classify a raw invocation payload.
    ///
    /// Fails only when the shape matched but the envelope's fields could not be decoded (for
    /// example an HTTP event whose `path` is not a string).
    pub fn classify(raw: Value) -> serde_json::Result<Self> {
        if is_http(&raw) {
            return Ok(Self::Http(serde_json::from_value(raw)?));
        }

        if let Some(source) = raw.get("source").and_then(Value::as_str) {
            if source == SCHEDULE_SOURCE {
                let resources = raw
                    .get("resources")
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                return Ok(Self::Scheduled(ScheduledTrigger {
                    source: source.to_string(),
                    resources,
                }));
            }
        }

        if is_sqs_batch(&raw) {
            let envelope: BatchEnvelope = serde_json::from_value(raw)?;
            return Ok(Self::Batch(BatchMessage {
                records: envelope.records,
            }));
        }

        Ok(Self::Unknown)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Scheduled(_) => "scheduled",
            Self::Batch(_) => "batch",
            Self::Unknown => "unknown",
        }
    }
}

fn is_http(raw: &Value) -> bool {
    raw.get("httpMethod").is_some() && raw.get("path").is_some()
}

fn is_sqs_batch(raw: &Value) -> bool {
    raw.get("Records")
        .and_then(Value::as_array)
        .and_then(|records| records.first())
        .and_then(|first| first.get("eventSource"))
        .and_then(Value::as_str)
        == Some(SQS_EVENT_SOURCE)
}
