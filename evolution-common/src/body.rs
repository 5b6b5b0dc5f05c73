//! Response body decoding.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// A decoded gateway response body.
///
/// Decoding makes a single JSON parse attempt and falls back to the raw text,
/// so a body never fails to decode.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// Body was syntactically valid JSON.
    Json(Value),
    /// Body was present but not JSON.
    Text(String),
    /// Body had no bytes at all.
    #[default]
    Empty,
}

impl Body {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Body::Empty;
        }

        match serde_json::from_slice(bytes) {
            Ok(value) => Body::Json(value),
            // Invalid UTF-8 is replaced rather than reported.
            Err(_) => Body::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    /// JSON view of the body: empty bodies become `{}`, text becomes a string.
    pub fn data(&self) -> Value {
        match self {
            Body::Json(value) => value.clone(),
            Body::Text(text) => Value::String(text.clone()),
            Body::Empty => Value::Object(serde_json::Map::new()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }
}

impl Serialize for Body {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Body::Json(value) => value.serialize(serializer),
            Body::Text(text) => serializer.serialize_str(text),
            Body::Empty => serializer.serialize_map(Some(0))?.end(),
        }
    }
}
