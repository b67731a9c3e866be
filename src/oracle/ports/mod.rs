//! Port contracts for the generation oracle.

pub mod gateway;
pub mod transport;

pub use gateway::{GenerationUnavailable, OracleGateway};
pub use transport::{TextTransport, TransportError, TransportResult};
