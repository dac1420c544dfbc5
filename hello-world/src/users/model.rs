use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_ext::is_truthy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Payload accepted by [`crate::users::UserService::create`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub name: Option<String>,
}

impl NewUser {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Read a create payload from a decoded request body.
    ///
    /// Falsy documents (`null`, `false`, `0`, `""`) carry no user at all. Any other document is a
    /// user whose `name` counts only when it is a string.
    pub fn from_body(body: &Value) -> Option<Self> {
        if !is_truthy(body) {
            return None;
        }
        Some(Self {
            name: body.get("name").and_then(Value::as_str).map(str::to_string),
        })
    }
}
