//! Instance connection state and message payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Body;

/// JSON pointers checked, in order, for the state string of a
/// `connectionState` response. Gateway versions disagree on the shape.
const STATE_POINTERS: [&str; 4] = ["/instance/state", "/state", "/status", "/connection"];

/// Normalized connection status of a gateway instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    /// Session is paired and open
    Connected,
    /// Session is pairing or reconnecting
    Connecting,
    /// Anything else, including an unknown state
    Disconnected,
}

impl ConnectionStatus {
    pub fn from_state(state: &str) -> Self {
        match state.trim().to_ascii_lowercase().as_str() {
            "open" | "connected" => ConnectionStatus::Connected,
            "connecting" => ConnectionStatus::Connecting,
            _ => ConnectionStatus::Disconnected,
        }
    }

    /// Extract the raw state string from a `connectionState` response body.
    pub fn raw_state(body: &Body) -> Option<&str> {
        let value = body.as_json()?;
        STATE_POINTERS
            .iter()
            .find_map(|pointer| value.pointer(pointer).and_then(Value::as_str))
    }

    pub fn from_body(body: &Body) -> Self {
        Self::raw_state(body)
            .map(Self::from_state)
            .unwrap_or(ConnectionStatus::Disconnected)
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Connected => write!(f, "connected"),
            ConnectionStatus::Connecting => write!(f, "connecting"),
            ConnectionStatus::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// Body of `POST /message/sendText/{instance}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendTextRequest {
    pub number: String,
    pub text: String,
}

impl SendTextRequest {
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            text: text.into(),
        }
    }
}
