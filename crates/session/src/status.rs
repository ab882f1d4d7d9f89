//! Status display sinks.

use facepoint_gesture_core::{FrameReport, Status};

/// Receives the report of every processed frame.
pub trait StatusSink: Send {
    fn update(&mut self, report: &FrameReport);
}

impl<F> StatusSink for F
where
    F: FnMut(&FrameReport) + Send,
{
    fn update(&mut self, report: &FrameReport) {
        self(report)
    }
}

/// Logs status transitions through `tracing`.
///
/// Countdown ticks are logged at debug level once per tenth of a second
/// shown, everything else only when the status changes.
#[derive(Debug, Default)]
pub struct LogStatusSink {
    last: Option<String>,
}

impl LogStatusSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusSink for LogStatusSink {
    fn update(&mut self, report: &FrameReport) {
        let text = report.status.to_string();
        if self.last.as_deref() == Some(text.as_str()) {
            return;
        }

        let countdown_tick = matches!(report.status, Status::ShuttingDown { .. })
            && matches!(self.last.as_deref(), Some(prev) if prev.starts_with("SHUTTING"));

        if countdown_tick {
            tracing::debug!(t = report.t, "{text}");
        } else if report.status.is_alert() {
            tracing::warn!(t = report.t, "{text}");
        } else if let Some(ratios) = report.ratios {
            tracing::info!(
                t = report.t,
                left_eye = %ratios.left_eye,
                right_eye = %ratios.right_eye,
                mouth = %ratios.mouth,
                "{text}"
            );
        } else {
            tracing::info!(t = report.t, "{text}");
        }
        self.last = Some(text);
    }
}
