//! Facepoint Linux Platform Integration
//!
//! Platform-specific implementations for Linux:
//! - **Display Detection:** Display server and monitor enumeration
//! - **Permissions:** Capability detection and user guidance

pub mod display;
pub mod permissions;

pub use display::*;
