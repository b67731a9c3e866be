//! Transport adapters for the generation oracle.

pub mod gemini;

pub use gemini::{GeminiCallStyle, GeminiTransport, gemini_gateway};
