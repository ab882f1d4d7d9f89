//! Facepoint Gesture Core
//!
//! Turns one frame of face landmarks into pointer actions:
//! - **Aspect Ratios:** Eye and mouth openness from landmark quartets
//! - **Cursor Filter:** Nose-to-screen mapping with exponential smoothing
//! - **Gesture Machine:** Shutdown hold, debounced blink clicks, mouth scroll
//! - **Processor:** Per-frame glue producing actions and a status report
//!
//! This crate is pure computation: no I/O, no platform dependencies.
//! Cross-frame state lives in [`SessionState`], which the caller owns and
//! passes in by mutable reference each frame.

pub mod aspect_ratio;
pub mod cursor_filter;
pub mod gesture;
pub mod processor;

pub use aspect_ratio::{AspectRatio, FaceRatios};
pub use cursor_filter::{CursorFilter, CursorState, ScreenSize};
pub use gesture::{EyeGesture, GestureMachine, GestureOutcome, GestureTimerState};
pub use processor::{FaceProcessor, FrameReport, SessionState, Status};
