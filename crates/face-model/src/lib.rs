//! Facepoint Face Model
//!
//! Defines the data contracts shared by the pipeline:
//! - **Landmarks:** Normalized face-mesh points and the fixed indices the
//!   gesture logic reads from them
//! - **Frames:** One line of tracker output per camera frame
//! - **Actions:** Pointer commands emitted for the dispatcher
//!
//! All landmark coordinates are normalized to `[0.0, 1.0]` relative to
//! the camera frame, so they are independent of camera resolution.

pub mod action;
pub mod frame;
pub mod landmark;

pub use action::*;
pub use frame::*;
pub use landmark::*;
