//! Error types for gateway calls.

use evolution_common::GatewayResponse;

/// Errors returned by [`crate::EvolutionClient`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection could not be established, or the timeout elapsed first.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status. The decoded body is kept.
    #[error("Gateway returned HTTP {}", .0.status)]
    HttpStatus(GatewayResponse),

    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(String),

    #[error("API key is not a valid header value")]
    InvalidApiKey,

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    /// The gateway response, when the failure happened after one arrived.
    pub fn response(&self) -> Option<&GatewayResponse> {
        match self {
            Error::HttpStatus(response) => Some(response),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(e) if e.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
