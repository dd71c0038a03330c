//! Tagged reply model and response classification.

use serde_json::{Map, Value};

/// Placeholder for batch metadata the gateway did not supply.
const NOT_AVAILABLE: &str = "N/A";

/// Normalized gateway response, one variant per recognized shape.
///
/// Constructed fresh per response and consumed immediately by the
/// presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayReply {
    /// Top-level `error` field, or a transport failure wrapped by a driver.
    Error {
        message: String,
    },
    /// A `result` that is not a JSON object.
    Scalar {
        value: Value,
    },
    /// A `result` object. `content` is set when the object carries a
    /// `content` string, which is the canonical display text.
    Structured {
        fields: Map<String, Value>,
        content: Option<String>,
    },
    /// An `events` batch as produced by the exec endpoint.
    EventBatch {
        conversation_id: String,
        status: String,
        events: Vec<GatewayEvent>,
    },
    /// Anything else, kept verbatim for opaque display.
    Raw {
        body: Value,
    },
}

/// One event out of an exec batch.
///
/// Unknown event kinds decode to `Other` so a newer gateway never aborts
/// batch processing on this side.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEvent {
    AssistantMessage { content: String },
    ToolUse { tool_name: String },
    Error { message: String },
    Other { kind: String, payload: Value },
}

impl GatewayEvent {
    /// Decode a single event from its raw JSON form.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value.get("type").and_then(Value::as_str) {
            Some("assistant_message") => Self::AssistantMessage {
                content: str_field(value, "content", ""),
            },
            Some("tool_use") => Self::ToolUse {
                tool_name: str_field(value, "tool_name", "unknown"),
            },
            Some("error") => Self::Error {
                message: str_field(value, "message", "Unknown error"),
            },
            Some(kind) => Self::Other {
                kind: kind.to_string(),
                payload: value.clone(),
            },
            None => Self::Other {
                kind: "unknown".to_string(),
                payload: value.clone(),
            },
        }
    }
}

/// Categorize a decoded response body.
///
/// Pure function of the raw JSON, transport-agnostic. The decision order
/// is significant: a body with both `error` and other recognized keys is
/// always an error.
#[must_use]
pub fn classify(body: Value) -> GatewayReply {
    let Value::Object(mut map) = body else {
        return GatewayReply::Raw { body };
    };

    if let Some(error) = map.remove("error") {
        return GatewayReply::Error {
            message: error_message(&error),
        };
    }

    if let Some(events) = map.remove("events") {
        let events = events
            .as_array()
            .map(|items| items.iter().map(GatewayEvent::from_value).collect())
            .unwrap_or_default();
        return GatewayReply::EventBatch {
            conversation_id: str_field_or_na(&map, "conversation_id"),
            status: str_field_or_na(&map, "status"),
            events,
        };
    }

    if let Some(result) = map.remove("result") {
        return match result {
            Value::Object(fields) => {
                let content = fields
                    .get("content")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                GatewayReply::Structured { fields, content }
            }
            value => GatewayReply::Scalar { value },
        };
    }

    GatewayReply::Raw {
        body: Value::Object(map),
    }
}

fn error_message(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        Value::Object(fields) => fields
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| error.to_string(), str::to_string),
        other => other.to_string(),
    }
}

fn str_field(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn str_field_or_na(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}
