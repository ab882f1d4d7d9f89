//! Facepoint Common Utilities
//!
//! Shared infrastructure for all Facepoint crates:
//! - Error types and result aliases
//! - Session clock for frames that arrive without timestamps
//! - Tracing/logging initialization
//! - Configuration loading and validation

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
