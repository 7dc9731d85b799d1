//! Wire types for the todo API.
//!
//! # Design
//! Stored records and request payloads are separate types. `TodoItem` always
//! carries a server-assigned `id`; `TodoInput` may carry one too, but it is
//! only type-checked and then dropped. Clients that echo back a full record
//! on update therefore work unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single todo item as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub description: Option<String>,
}

/// Request payload for both create and full-replacement update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoInput {
    /// Accepted for shape compatibility, never stored.
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, deserialize_with = "lax_bool")]
    pub completed: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Accepts JSON booleans, the numbers 0 and 1, and the usual yes/no style
/// strings (case-insensitive). Anything else, `null` included, is rejected.
fn lax_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Bool(flag) => Ok(flag),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(false),
        Value::Number(n) if n.as_f64() == Some(1.0) => Ok(true),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "1" | "on" | "t" | "true" | "y" | "yes" => Ok(true),
            "0" | "off" | "f" | "false" | "n" | "no" => Ok(false),
            _ => Err(D::Error::custom(format!("invalid boolean: {s:?}"))),
        },
        other => Err(D::Error::custom(format!("invalid boolean: {other}"))),
    }
}

impl TodoInput {
    /// Builds the stored record under `id`, discarding any id in the payload.
    pub fn into_item(self, id: String) -> TodoItem {
        TodoItem {
            id,
            title: self.title,
            completed: self.completed,
            description: self.description,
        }
    }
}

/// `{"message": ...}` body used by the root and delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
