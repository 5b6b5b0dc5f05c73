//! Evolution Common Types
//!
//! Shared types used by the gateway client and its command-line entry point.

pub mod body;
pub mod connection;
pub mod phone;
pub mod response;

pub use body::Body;
pub use connection::{ConnectionStatus, SendTextRequest};
pub use phone::{is_valid_number, normalize_number};
pub use response::GatewayResponse;
