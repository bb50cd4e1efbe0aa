//! Record formatters
//!
//! - Json: single-line JSON object, one record per line
//! - Logfmt: single-line `key=value` pairs
//! - Human: `<level>: <message>, User ID: <userId>, Hostname: <hostName>`

use super::fields::FieldValue;
use super::log_level::ColorHint;
use super::record::LogRecord;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Output format of a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Formatter {
    /// JSON lines
    ///
    /// Example: `{"hostName":"box","level":"error","message":"disk full","timestamp":"...","userId":"42"}`
    Json {
        #[serde(default)]
        timestamp: TimestampFormat,
    },

    /// Logfmt
    ///
    /// Example: `timestamp=... level=error message="disk full" hostName=box userId=42`
    Logfmt {
        #[serde(default)]
        timestamp: TimestampFormat,
    },

    /// Interactive console line, level optionally colored
    ///
    /// Example: `error: disk full, User ID: 42, Hostname: box`
    Human {
        #[serde(default = "default_colors")]
        colors: bool,
    },
}

fn default_colors() -> bool {
    true
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::json()
    }
}

impl Formatter {
    pub fn json() -> Self {
        Formatter::Json {
            timestamp: TimestampFormat::default(),
        }
    }

    pub fn logfmt() -> Self {
        Formatter::Logfmt {
            timestamp: TimestampFormat::default(),
        }
    }

    pub fn human(colors: bool) -> Self {
        Formatter::Human { colors }
    }

    pub fn is_human_readable(&self) -> bool {
        matches!(self, Formatter::Human { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Formatter::Json { .. } => "json",
            Formatter::Logfmt { .. } => "logfmt",
            Formatter::Human { .. } => "human",
        }
    }

    /// Render a record as a single line, without the trailing delimiter
    pub fn format(&self, record: &LogRecord, color: ColorHint) -> String {
        match self {
            Formatter::Json { timestamp } => Self::format_json(record, timestamp),
            Formatter::Logfmt { timestamp } => Self::format_logfmt(record, timestamp),
            Formatter::Human { colors } => Self::format_human(record, *colors, color),
        }
    }

    fn format_json(record: &LogRecord, timestamp: &TimestampFormat) -> String {
        let mut json_obj = serde_json::Map::new();

        // Fields go in first so the fixed keys below always win.
        for (key, value) in record.fields.iter() {
            json_obj.insert(key.clone(), value.to_json_value());
        }

        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(record.level.clone()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(record.message.clone()),
        );
        json_obj.insert(
            "timestamp".to_string(),
            timestamp.to_json_value(&record.timestamp),
        );

        // A map of plain JSON values always serializes.
        serde_json::Value::Object(json_obj).to_string()
    }

    fn format_logfmt(record: &LogRecord, timestamp: &TimestampFormat) -> String {
        let mut parts = Vec::with_capacity(record.fields.len() + 3);

        parts.push(format!(
            "timestamp={}",
            escape_logfmt_value(&timestamp.format(&record.timestamp))
        ));
        parts.push(format!("level={}", escape_logfmt_value(&record.level)));
        parts.push(format!("message={}", quote_logfmt_value(&record.message)));

        for (key, value) in record.fields.iter() {
            let key = escape_logfmt_key(key);
            // The fixed keys above always win; empty keys have nothing to name.
            if key.is_empty() || LOGFMT_FIXED_KEYS.contains(&key.as_str()) {
                continue;
            }
            let formatted_value = match value {
                FieldValue::String(s) => escape_logfmt_value(s),
                FieldValue::Json(v) => quote_logfmt_value(&v.to_string()),
                other => other.to_string(),
            };
            parts.push(format!("{}={}", key, formatted_value));
        }

        parts.join(" ")
    }

    fn format_human(record: &LogRecord, colors: bool, color: ColorHint) -> String {
        let level = if colors {
            paint(&record.level, color)
        } else {
            record.level.clone()
        };

        format!(
            "{}: {}, User ID: {}, Hostname: {}",
            level,
            record.message,
            record.user_id().unwrap_or("-"),
            record.host_name().unwrap_or("-"),
        )
    }
}

#[cfg(feature = "console")]
fn paint(text: &str, color: ColorHint) -> String {
    use colored::Colorize;
    match color.color_code() {
        Some(code) => text.color(code).to_string(),
        None => text.to_string(),
    }
}

#[cfg(not(feature = "console"))]
fn paint(text: &str, _color: ColorHint) -> String {
    text.to_string()
}

const LOGFMT_FIXED_KEYS: [&str; 3] = ["timestamp", "level", "message"];

/// Keep only characters that are safe in a bare logfmt key
fn escape_logfmt_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
        .collect()
}

/// Quote a logfmt value if it contains whitespace, quotes or `=`
fn escape_logfmt_value(value: &str) -> String {
    if value.is_empty() || value.contains([' ', '"', '=', '\\', '\n', '\r', '\t']) {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

/// Quote and escape a logfmt value so it never spans lines
fn quote_logfmt_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
