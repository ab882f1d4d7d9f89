//! Per-frame processing.
//!
//! [`FaceProcessor`] runs the ratio extractor, cursor filter, and gesture
//! machine for one tracker frame and reports the resulting actions plus
//! a user-facing status for the display sink.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use facepoint_common::config::AppConfig;
use facepoint_face_model::{Action, FaceMeshIndices, LandmarkSet, MouseButton};

use crate::aspect_ratio::FaceRatios;
use crate::cursor_filter::{CursorFilter, CursorState, ScreenSize};
use crate::gesture::{EyeGesture, GestureMachine, GestureTimerState};

/// All state carried from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub cursor: CursorState,
    pub timers: GestureTimerState,
}

impl SessionState {
    pub fn is_terminated(&self) -> bool {
        self.timers.terminated
    }
}

/// Status shown to the user for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    /// No face in view.
    Scanning,
    /// Face tracked, nothing else happening.
    CursorActive,
    LeftClick,
    RightClick,
    Scrolling,
    /// Both eyes closed; shutdown in `remaining_secs`.
    ShuttingDown { remaining_secs: f64 },
    Shutdown,
}

impl Status {
    /// Whether the display should render this status as a warning.
    pub fn is_alert(&self) -> bool {
        matches!(self, Status::ShuttingDown { .. } | Status::Shutdown)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Scanning => f.write_str("Scanning..."),
            Status::CursorActive => f.write_str("Cursor Active"),
            Status::LeftClick => f.write_str("LEFT CLICK"),
            Status::RightClick => f.write_str("RIGHT CLICK"),
            Status::Scrolling => f.write_str("SCROLLING"),
            Status::ShuttingDown { remaining_secs } => {
                write!(f, "SHUTTING DOWN IN: {remaining_secs:.1}s")
            }
            Status::Shutdown => f.write_str("SHUTDOWN"),
        }
    }
}

/// Everything one frame produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame time in seconds.
    pub t: f64,

    /// Actions in dispatch order: move, click or shutdown, scroll.
    pub actions: Vec<Action>,

    pub status: Status,

    /// Seconds left on the shutdown hold while it is running.
    pub countdown: Option<f64>,

    /// Ratios for diagnostics; `None` when no face was processed.
    pub ratios: Option<FaceRatios>,
}

impl FrameReport {
    fn idle(t: f64, status: Status) -> Self {
        Self {
            t,
            actions: Vec::new(),
            status,
            countdown: None,
            ratios: None,
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.actions.iter().any(Action::is_shutdown)
    }

    pub fn face_detected(&self) -> bool {
        self.ratios.is_some()
    }
}

/// Runs the per-frame pipeline for one detected face (or none).
#[derive(Debug, Clone)]
pub struct FaceProcessor {
    indices: FaceMeshIndices,
    mirror_input: bool,
    cursor: CursorFilter,
    gestures: GestureMachine,
}

impl FaceProcessor {
    pub fn new(config: &AppConfig, screen: ScreenSize) -> Self {
        let indices = if config.landmarks.mirror_input {
            FaceMeshIndices::MEDIAPIPE.mirrored()
        } else {
            FaceMeshIndices::MEDIAPIPE
        };
        Self {
            indices,
            mirror_input: config.landmarks.mirror_input,
            cursor: CursorFilter::new(&config.cursor, screen),
            gestures: GestureMachine::new(&config.gesture),
        }
    }

    pub fn screen(&self) -> ScreenSize {
        self.cursor.screen()
    }

    /// Process one frame at time `t`.
    ///
    /// Frames without a usable face do not touch `state`: the cursor stays
    /// put and gesture timers stay frozen until the face returns.
    pub fn process(
        &self,
        state: &mut SessionState,
        face: Option<&LandmarkSet>,
        t: f64,
    ) -> FrameReport {
        if state.is_terminated() {
            return FrameReport::idle(t, Status::Shutdown);
        }

        let Some(face) = face else {
            return FrameReport::idle(t, Status::Scanning);
        };

        if face.len() < self.indices.required_len() {
            tracing::debug!(
                points = face.len(),
                required = self.indices.required_len(),
                "Landmark set too short, treating frame as no face"
            );
            return FrameReport::idle(t, Status::Scanning);
        }

        let face = if self.mirror_input {
            Cow::Owned(face.mirrored())
        } else {
            Cow::Borrowed(face)
        };

        let mut actions = Vec::with_capacity(3);
        if let Some(nose) = face.get(self.indices.nose_tip) {
            actions.push(self.cursor.apply(&mut state.cursor, nose));
        }

        let ratios = FaceRatios::extract(&face, &self.indices);
        let outcome = self.gestures.step(&mut state.timers, &ratios, t);
        actions.extend(outcome.actions());

        let status = match outcome.eyes {
            EyeGesture::Shutdown => Status::Shutdown,
            _ if outcome.scroll.is_some() => Status::Scrolling,
            EyeGesture::Countdown { remaining_secs } => Status::ShuttingDown { remaining_secs },
            EyeGesture::Click(MouseButton::Left) => Status::LeftClick,
            EyeGesture::Click(MouseButton::Right) => Status::RightClick,
            EyeGesture::Idle => Status::CursorActive,
        };

        FrameReport {
            t,
            actions,
            status,
            countdown: outcome.countdown(),
            ratios: Some(ratios),
        }
    }
}
