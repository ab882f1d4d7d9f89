//! Facepoint Session
//!
//! Connects the pieces of a running session: a [`FrameSource`] of tracker
//! output, a [`LandmarkTracker`] picking the face to follow, the gesture
//! processor, a pointer dispatcher, and a [`StatusSink`] for feedback.
//!
//! Frames are processed strictly one at a time in arrival order; the
//! next frame is not read until the previous frame's actions have been
//! dispatched.

pub mod session;
pub mod source;
pub mod status;
pub mod tracker;

pub use session::{EndReason, GestureSession, SessionSummary};
pub use source::{FrameSource, JsonlFrameSource, VecFrameSource};
pub use status::{LogStatusSink, StatusSink};
pub use tracker::{FirstFaceTracker, LandmarkTracker, TrackedFace};
