//! Generation oracle access for Skillquest.
//!
//! The oracle is an untrusted large-language-model endpoint: text goes in and
//! JSON-shaped text is expected back. This module knows nothing about tasks.
//!
//! - Port contracts in [`ports`]
//! - Transport adapters in [`adapters`]
//! - Primary/secondary fallback in [`gateway`]
//! - Payload cleaning and parsing in [`sanitizer`]

pub mod adapters;
pub mod gateway;
pub mod ports;
pub mod sanitizer;

pub use gateway::FallbackGateway;
pub use ports::{GenerationUnavailable, OracleGateway, TextTransport, TransportError};
pub use sanitizer::{MalformedOracleResponse, sanitize, strip_code_fences};

#[cfg(test)]
mod tests;
