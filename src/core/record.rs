//! Log record and call payloads

use super::fields::{FieldValue, Fields};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field key set by the enrichment stage for the caller identity
pub const USER_ID_FIELD: &str = "userId";
/// Field key set by the enrichment stage for the machine host name
pub const HOST_NAME_FIELD: &str = "hostName";

const MESSAGE_KEY: &str = "message";
const PRIVATE_KEY: &str = "private";

/// What a caller hands to `Logger::log`
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Plain message text
    Text(String),
    /// Structured object; members are merged into the record's fields
    Structured(serde_json::Map<String, serde_json::Value>),
}

impl Payload {
    /// Structured payload from any serializable value.
    ///
    /// Values that do not encode to a JSON object are logged as text.
    pub fn from_serialize<T: Serialize>(value: &T) -> super::error::Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<&String> for Payload {
    fn from(s: &String) -> Self {
        Payload::Text(s.clone())
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Payload::Structured(map),
            serde_json::Value::String(s) => Payload::Text(s),
            other => Payload::Text(other.to_string()),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Payload {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Payload::Structured(map)
    }
}

/// One logging event between the call site and the sinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Fields::is_empty")]
    pub fields: Fields,
    #[serde(default)]
    pub private: bool,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a single call can never produce more than one output line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: impl Into<String>, message: impl AsRef<str>) -> Self {
        Self {
            level: level.into(),
            message: Self::sanitize_message(message.as_ref()),
            timestamp: Utc::now(),
            fields: Fields::new(),
            private: false,
        }
    }

    /// Build a record from a call payload.
    ///
    /// For structured payloads a string `message` member becomes the message,
    /// otherwise the compact JSON of the whole object does. A boolean
    /// `private` member sets the private flag instead of becoming a field.
    pub fn from_payload(level: impl Into<String>, payload: Payload) -> Self {
        match payload {
            Payload::Text(text) => Self::new(level, text),
            Payload::Structured(mut map) => {
                let private = match map.remove(PRIVATE_KEY) {
                    Some(serde_json::Value::Bool(flag)) => flag,
                    Some(other) => {
                        map.insert(PRIVATE_KEY.to_string(), other);
                        false
                    }
                    None => false,
                };

                let message = match map.remove(MESSAGE_KEY) {
                    Some(serde_json::Value::String(s)) => s,
                    Some(other) => {
                        map.insert(MESSAGE_KEY.to_string(), other);
                        serde_json::Value::Object(map.clone()).to_string()
                    }
                    None => serde_json::Value::Object(map.clone()).to_string(),
                };

                let mut record = Self::new(level, message);
                record.private = private;
                record.fields = map
                    .into_iter()
                    .filter(|(k, _)| k != MESSAGE_KEY)
                    .map(|(k, v)| (k, FieldValue::from(v)))
                    .collect();
                record
            }
        }
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields.extend(fields);
        self
    }

    #[must_use]
    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    pub fn user_id(&self) -> Option<&str> {
        self.fields.get(USER_ID_FIELD).and_then(FieldValue::as_str)
    }

    pub fn host_name(&self) -> Option<&str> {
        self.fields.get(HOST_NAME_FIELD).and_then(FieldValue::as_str)
    }
}
