use std::fmt;

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// The JSON object returned by `/generate`, on success or failure.
///
/// Every field is optional. `null`, `false`, `0` and `""` count as absent so
/// that a server sending `"user_description": ""` does not reveal an empty block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerateResult {
    #[serde(default, deserialize_with = "loose_text")]
    pub resume_text: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub user_description: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub pdf_file: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub docx_file: Option<String>,
    #[serde(default, deserialize_with = "loose_detail")]
    pub detail: Option<ErrorDetail>,
    #[serde(default, deserialize_with = "loose_text")]
    pub error: Option<String>,
}

impl GenerateResult {
    /// Builds a result from a decoded JSON document. A `null` body has no keys
    /// to read and is a decode error; any other non-object carries none of the
    /// known keys and yields an empty result.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(_) => serde_json::from_value(value),
            Value::Null => Err(de::Error::custom("expected a JSON object, found null")),
            _ => Ok(Self::default()),
        }
    }

    /// What to show for a non-success response. `status_text` is the last
    /// resort when the body names neither `detail` nor `error`.
    pub fn failure(&self, status_text: &str) -> Failure {
        match &self.detail {
            Some(ErrorDetail::ValidationList(entries)) => {
                Failure::Validation(entries.iter().map(ValidationEntry::to_line).collect())
            }
            Some(ErrorDetail::Message(message)) => Failure::Message(message.clone()),
            Some(ErrorDetail::Other(value)) => Failure::Message(value.to_string()),
            None => Failure::Message(
                self.error
                    .clone()
                    .unwrap_or_else(|| status_text.to_string()),
            ),
        }
    }
}

/// The `detail` key, which servers fill with either a message or a list of
/// validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    Message(String),
    ValidationList(Vec<ValidationEntry>),
    /// Neither a string nor a list; shown as its JSON text.
    Other(Value),
}

impl ErrorDetail {
    pub fn from_value(value: &Value) -> Option<Self> {
        if is_falsy(value) {
            return None;
        }
        Some(match value {
            Value::Array(items) => {
                ErrorDetail::ValidationList(items.iter().map(ValidationEntry::from_value).collect())
            }
            Value::String(s) => ErrorDetail::Message(s.clone()),
            other => ErrorDetail::Other(other.clone()),
        })
    }
}

/// One entry of a structured validation error list: `{loc: [...], msg: "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationEntry {
    pub loc: Vec<LocSegment>,
    pub msg: String,
}

impl ValidationEntry {
    /// Lenient: entries missing `loc` or `msg` render with empty parts.
    pub fn from_value(value: &Value) -> Self {
        let loc = match value.get("loc") {
            Some(Value::Array(segments)) => segments.iter().map(LocSegment::from_value).collect(),
            Some(other) if !is_falsy(other) => vec![LocSegment::from_value(other)],
            _ => Vec::new(),
        };
        let msg = value.get("msg").map(value_text).unwrap_or_default();

        Self { loc, msg }
    }

    /// Dotted field path, e.g. `body.email` or `body.skills.0`.
    pub fn path(&self) -> String {
        self.loc
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn to_line(&self) -> String {
        format!("{}: {}", self.path(), self.msg)
    }
}

/// A `loc` path segment: a field name or a list index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocSegment {
    Key(String),
    Index(i64),
}

impl LocSegment {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => LocSegment::Index(i),
                None => LocSegment::Key(n.to_string()),
            },
            other => LocSegment::Key(value_text(other)),
        }
    }
}

impl fmt::Display for LocSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocSegment::Key(key) => f.write_str(key),
            LocSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// The message lines for a failed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Validation(Vec<String>),
    Message(String),
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok((!is_falsy(&value)).then(|| value_text(&value)))
}

fn loose_detail<'de, D>(deserializer: D) -> Result<Option<ErrorDetail>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(ErrorDetail::from_value(&value))
}
