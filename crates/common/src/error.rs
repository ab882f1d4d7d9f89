//! Error types shared across Facepoint crates.

use std::path::PathBuf;

/// Top-level error type for Facepoint operations.
#[derive(Debug, thiserror::Error)]
pub enum FacepointError {
    #[error("Frame source error: {message}")]
    FrameSource { message: String },

    #[error("Pointer backend error: {message}")]
    Pointer { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Platform error: {message}")]
    Platform { message: String },

    #[error("Fail-safe triggered: cursor reached the top-left corner ({x}, {y})")]
    FailSafe { x: i32, y: i32 },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using FacepointError.
pub type FacepointResult<T> = Result<T, FacepointError>;

impl FacepointError {
    pub fn frame_source(msg: impl Into<String>) -> Self {
        Self::FrameSource {
            message: msg.into(),
        }
    }

    pub fn pointer(msg: impl Into<String>) -> Self {
        Self::Pointer {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform {
            message: msg.into(),
        }
    }
}
