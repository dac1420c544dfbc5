//! The result shape returned to the Lambda runtime for every event.

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// `{ "statusCode": ..., "body": "<json>" }`.
///
/// `body` always holds a JSON document, including on error paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[derive(Serialize)]
struct Message<'a> {
    message: &'a str,
}

impl Response {
    /// Serialize `payload` as the response body.
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, payload: &T) -> Self {
        let body = serde_json::to_string(payload).unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to encode response body");
            "{}".to_string()
        });
        Self {
            status_code: status.as_u16(),
            body,
        }
    }

    /// `{ "message": ... }` body, used by every error path.
    pub fn message(status: StatusCode, message: &str) -> Self {
        Self::json(status, &Message { message })
    }

    /// Decode the body back into JSON. Mostly useful for assertions.
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}
