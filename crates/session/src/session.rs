//! The gesture session loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use facepoint_common::clock::SessionClock;
use facepoint_common::error::{FacepointError, FacepointResult};
use facepoint_gesture_core::{FaceProcessor, SessionState};
use facepoint_pointer::ActionDispatcher;

use crate::source::FrameSource;
use crate::status::{LogStatusSink, StatusSink};
use crate::tracker::{FirstFaceTracker, LandmarkTracker};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The user held both eyes closed for the shutdown duration.
    Shutdown,
    /// The stop flag was raised (Ctrl+C).
    Stopped,
    /// The frame source ran out of frames.
    SourceExhausted,
    /// The cursor reached the top-left corner.
    FailSafe,
}

/// What a finished session did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub frames: u64,
    pub face_frames: u64,
    pub clicks: u64,
    pub scrolls: u64,
    pub end_reason: EndReason,
}

/// Drives frames from a source through the processor into a dispatcher.
///
/// The session owns all cross-frame state and is the only thing that
/// mutates it.
pub struct GestureSession {
    source: Box<dyn FrameSource>,
    tracker: Box<dyn LandmarkTracker>,
    processor: FaceProcessor,
    dispatcher: ActionDispatcher,
    status: Box<dyn StatusSink>,
    state: SessionState,
    clock: SessionClock,
    stop_flag: Arc<AtomicBool>,
    frames: u64,
    face_frames: u64,
}

impl GestureSession {
    pub fn new(
        source: Box<dyn FrameSource>,
        processor: FaceProcessor,
        dispatcher: ActionDispatcher,
    ) -> Self {
        Self {
            source,
            tracker: Box::new(FirstFaceTracker),
            processor,
            dispatcher,
            status: Box::new(LogStatusSink::new()),
            state: SessionState::default(),
            clock: SessionClock::start(),
            stop_flag: Arc::new(AtomicBool::new(false)),
            frames: 0,
            face_frames: 0,
        }
    }

    pub fn with_tracker(mut self, tracker: Box<dyn LandmarkTracker>) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn with_status_sink(mut self, status: Box<dyn StatusSink>) -> Self {
        self.status = status;
        self
    }

    /// Current cross-frame state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Set the stop flag.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Run until shutdown, stop, source exhaustion, or the fail-safe.
    ///
    /// Blocks on the frame source; run it on a blocking thread.
    pub fn run(&mut self) -> FacepointResult<SessionSummary> {
        let screen = self.processor.screen();
        tracing::info!(
            source = %self.source.name(),
            tracker = %self.tracker.name(),
            backend = %self.dispatcher.backend_name(),
            screen_width = screen.width,
            screen_height = screen.height,
            epoch = %self.clock.epoch_wall(),
            "Gesture session started"
        );

        let end_reason = loop {
            if self.stop_flag.load(Ordering::Relaxed) {
                break EndReason::Stopped;
            }

            let Some(frame) = self.source.next_frame()? else {
                break EndReason::SourceExhausted;
            };
            let t = frame.t.unwrap_or_else(|| self.clock.elapsed_secs());

            let face = self.tracker.track(&frame)?;
            let report = self.processor.process(&mut self.state, face.as_deref(), t);
            self.frames += 1;
            if report.face_detected() {
                self.face_frames += 1;
            }

            match self.dispatcher.dispatch(t, &report.actions) {
                Ok(()) => {}
                Err(FacepointError::FailSafe { x, y }) => {
                    tracing::warn!(x, y, "Fail-safe triggered, ending session");
                    break EndReason::FailSafe;
                }
                Err(e) => return Err(e),
            }

            self.status.update(&report);

            if report.is_shutdown() {
                break EndReason::Shutdown;
            }
        };

        self.dispatcher.finish()?;

        let stats = self.dispatcher.stats();
        let summary = SessionSummary {
            frames: self.frames,
            face_frames: self.face_frames,
            clicks: stats.clicks,
            scrolls: stats.scrolls,
            end_reason,
        };

        tracing::info!(
            frames = summary.frames,
            face_frames = summary.face_frames,
            clicks = summary.clicks,
            scrolls = summary.scrolls,
            backend_errors = stats.backend_errors,
            reason = ?summary.end_reason,
            duration_ms = SessionClock::secs_to_ms(self.clock.elapsed_secs()),
            "Gesture session ended"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::VecFrameSource;
    use facepoint_common::config::{AppConfig, DispatchConfig};
    use facepoint_face_model::{FrameRecord, Landmark, LandmarkSet};
    use facepoint_gesture_core::ScreenSize;
    use facepoint_pointer::StubBackend;

    fn session(frames: Vec<FrameRecord>) -> GestureSession {
        let config = AppConfig::default();
        let processor = FaceProcessor::new(&config, ScreenSize::new(800, 600));
        let dispatcher = ActionDispatcher::new(
            Box::new(StubBackend::new()),
            800,
            600,
            &DispatchConfig::default(),
        );
        GestureSession::new(Box::new(VecFrameSource::new(frames)), processor, dispatcher)
    }

    #[test]
    fn test_stop_flag_checked_before_first_frame() {
        let mut session = session(vec![FrameRecord::empty(Some(0.0))]);
        session.stop();
        let summary = session.run().unwrap();
        assert_eq!(summary.end_reason, EndReason::Stopped);
        assert_eq!(summary.frames, 0);
    }

    #[test]
    fn test_empty_frames_exhaust_source() {
        let frames = (0..5).map(|i| FrameRecord::empty(Some(i as f64 * 0.1))).collect();
        let mut session = session(frames);
        let summary = session.run().unwrap();
        assert_eq!(summary.end_reason, EndReason::SourceExhausted);
        assert_eq!(summary.frames, 5);
        assert_eq!(summary.face_frames, 0);
        assert_eq!(session.state(), &SessionState::default());
    }

    #[test]
    fn test_short_mesh_counts_as_no_face() {
        let short = LandmarkSet::new(vec![Landmark::new(0.5, 0.5); 10]);
        let mut session = session(vec![FrameRecord::with_face(None, short)]);
        let summary = session.run().unwrap();
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.face_frames, 0);
    }
}
