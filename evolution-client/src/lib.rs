//! Client for Evolution API style WhatsApp gateways.

pub mod client;
pub mod config;
pub mod error;
pub mod verify;

pub use self::client::{EvolutionClient, Method};
pub use self::config::{Config, DefaultsConfig, GatewayConfig, LoggingConfig};
pub use self::error::{Error, Result};
pub use evolution_common::{Body, ConnectionStatus, GatewayResponse, SendTextRequest};
