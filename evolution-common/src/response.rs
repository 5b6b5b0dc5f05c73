//! Normalized gateway response.

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::Body;

/// Status code and decoded body of a single gateway round trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayResponse {
    pub status: u16,
    pub data: Body,
    /// Wall time from sending the request to receiving the full body.
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl GatewayResponse {
    pub fn new(status: u16, data: Body, elapsed: Duration) -> Self {
        Self {
            status,
            data,
            elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(elapsed.as_millis() as u64)
}
