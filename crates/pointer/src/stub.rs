//! In-memory backend that records every call instead of moving the pointer.

use std::sync::{Arc, Mutex};

use facepoint_common::error::{FacepointError, FacepointResult};
use facepoint_face_model::MouseButton;

use crate::PointerBackend;

/// One recorded backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerCall {
    MoveTo { x: i32, y: i32 },
    Click(MouseButton),
    Scroll(i32),
}

/// Read handle on a stub backend's call log. Stays valid after the
/// backend is boxed and handed to a dispatcher.
#[derive(Debug, Clone, Default)]
pub struct StubRecorder {
    calls: Arc<Mutex<Vec<PointerCall>>>,
}

impl StubRecorder {
    /// Snapshot of every call so far.
    pub fn calls(&self) -> Vec<PointerCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn clicks(&self) -> Vec<MouseButton> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PointerCall::Click(button) => Some(button),
                _ => None,
            })
            .collect()
    }

    /// The most recent cursor position, if the cursor ever moved.
    pub fn last_position(&self) -> Option<(i32, i32)> {
        self.calls().into_iter().rev().find_map(|call| match call {
            PointerCall::MoveTo { x, y } => Some((x, y)),
            _ => None,
        })
    }

    fn push(&self, call: PointerCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

/// Stub backend for tests and dry runs.
#[derive(Debug, Default)]
pub struct StubBackend {
    recorder: StubRecorder,
    fail: bool,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every call fails without recording.
    pub fn failing() -> Self {
        Self {
            recorder: StubRecorder::default(),
            fail: true,
        }
    }

    pub fn recorder(&self) -> StubRecorder {
        self.recorder.clone()
    }

    fn record(&mut self, call: PointerCall) -> FacepointResult<()> {
        if self.fail {
            return Err(FacepointError::pointer(format!("stub rejected {call:?}")));
        }
        self.recorder.push(call);
        Ok(())
    }
}

impl PointerBackend for StubBackend {
    fn move_to(&mut self, x: i32, y: i32) -> FacepointResult<()> {
        self.record(PointerCall::MoveTo { x, y })
    }

    fn click(&mut self, button: MouseButton) -> FacepointResult<()> {
        self.record(PointerCall::Click(button))
    }

    fn scroll(&mut self, delta: i32) -> FacepointResult<()> {
        self.record(PointerCall::Scroll(delta))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_sees_calls_after_move() {
        let backend = StubBackend::new();
        let recorder = backend.recorder();
        let mut boxed: Box<dyn PointerBackend> = Box::new(backend);

        boxed.move_to(10, 20).unwrap();
        boxed.click(MouseButton::Right).unwrap();
        boxed.move_to(11, 21).unwrap();

        assert_eq!(recorder.calls().len(), 3);
        assert_eq!(recorder.clicks(), vec![MouseButton::Right]);
        assert_eq!(recorder.last_position(), Some((11, 21)));
    }

    #[test]
    fn test_failing_stub_records_nothing() {
        let mut backend = StubBackend::failing();
        let recorder = backend.recorder();
        assert!(backend.scroll(-40).is_err());
        assert!(recorder.calls().is_empty());
    }
}
