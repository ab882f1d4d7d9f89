//! Blink and mouth gesture state machine.
//!
//! Rules are evaluated per face frame in a fixed priority order:
//!
//! 1. **Bilateral closure.** Both eyes closed starts (or continues) the
//!    shutdown hold. While it is running no clicks are recognized; once
//!    the hold reaches its duration the session is shut down. Any frame
//!    where an eye is open resets the hold to zero.
//! 2. **Blink click.** With at least one eye open and the debounce
//!    window elapsed, a closed left eye clicks left, otherwise a closed
//!    right eye clicks right.
//! 3. **Mouth scroll.** An open mouth scrolls on every frame, alongside
//!    whatever the eyes did. It is skipped only on the shutdown frame.
//!
//! The machine is never told about frames without a face, so those
//! frames leave every timer frozen.

use serde::{Deserialize, Serialize};

use facepoint_common::config::GestureConfig;
use facepoint_face_model::{Action, MouseButton};

use crate::aspect_ratio::FaceRatios;

/// Cross-frame gesture timers. Times are seconds on the session clock.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureTimerState {
    /// Start of the current bilateral closure, if one is in progress.
    pub eyes_closed_since: Option<f64>,

    /// Time of the last emitted click of either button. `None` until the
    /// first click, so the first blink of a session is never debounced.
    pub last_click_time: Option<f64>,

    /// Set once shutdown has fired. Terminal.
    pub terminated: bool,
}

/// What the eyes did this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EyeGesture {
    /// Nothing actionable (eyes open, or click debounced).
    #[default]
    Idle,

    /// A single-eye blink was recognized.
    Click(MouseButton),

    /// Both eyes are closed and the shutdown hold is running.
    Countdown { remaining_secs: f64 },

    /// The shutdown hold completed.
    Shutdown,
}

/// Result of one gesture step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureOutcome {
    pub eyes: EyeGesture,

    /// Scroll delta, when the mouth is open.
    pub scroll: Option<i32>,
}

impl GestureOutcome {
    /// Actions in emission order: click or shutdown first, then scroll.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(2);
        match self.eyes {
            EyeGesture::Click(button) => actions.push(Action::Click { button }),
            EyeGesture::Shutdown => actions.push(Action::Shutdown),
            EyeGesture::Idle | EyeGesture::Countdown { .. } => {}
        }
        if let Some(delta) = self.scroll {
            actions.push(Action::Scroll { delta });
        }
        actions
    }

    pub fn countdown(&self) -> Option<f64> {
        match self.eyes {
            EyeGesture::Countdown { remaining_secs } => Some(remaining_secs),
            _ => None,
        }
    }
}

/// Threshold and timing rules. State is passed in by the caller.
#[derive(Debug, Clone)]
pub struct GestureMachine {
    eye_closed_threshold: f64,
    mouth_open_threshold: f64,
    click_debounce_secs: f64,
    shutdown_hold_secs: f64,
    scroll_delta: i32,
}

impl GestureMachine {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            eye_closed_threshold: config.eye_closed_threshold,
            mouth_open_threshold: config.mouth_open_threshold,
            click_debounce_secs: config.click_debounce_secs,
            shutdown_hold_secs: config.shutdown_hold_secs,
            scroll_delta: config.scroll_delta,
        }
    }

    /// Evaluate one face frame at time `t`.
    pub fn step(
        &self,
        timers: &mut GestureTimerState,
        ratios: &FaceRatios,
        t: f64,
    ) -> GestureOutcome {
        if timers.terminated {
            return GestureOutcome::default();
        }

        let left_closed = ratios.left_eye.is_below(self.eye_closed_threshold);
        let right_closed = ratios.right_eye.is_below(self.eye_closed_threshold);

        let eyes = if left_closed && right_closed {
            self.hold_shutdown(timers, t)
        } else {
            if timers.eyes_closed_since.take().is_some() {
                tracing::debug!(t, "Shutdown hold released");
            }
            self.check_click(timers, left_closed, right_closed, t)
        };

        if eyes == EyeGesture::Shutdown {
            return GestureOutcome { eyes, scroll: None };
        }

        let scroll = ratios
            .mouth
            .is_above(self.mouth_open_threshold)
            .then_some(self.scroll_delta);

        GestureOutcome { eyes, scroll }
    }

    fn hold_shutdown(&self, timers: &mut GestureTimerState, t: f64) -> EyeGesture {
        let since = *timers.eyes_closed_since.get_or_insert_with(|| {
            tracing::debug!(t, "Shutdown hold started");
            t
        });
        let elapsed = t - since;

        if elapsed >= self.shutdown_hold_secs {
            tracing::info!(elapsed, "Shutdown hold completed");
            timers.terminated = true;
            EyeGesture::Shutdown
        } else {
            EyeGesture::Countdown {
                remaining_secs: self.shutdown_hold_secs - elapsed,
            }
        }
    }

    fn check_click(
        &self,
        timers: &mut GestureTimerState,
        left_closed: bool,
        right_closed: bool,
        t: f64,
    ) -> EyeGesture {
        if let Some(last) = timers.last_click_time {
            if t - last <= self.click_debounce_secs {
                return EyeGesture::Idle;
            }
        }

        let button = if left_closed {
            MouseButton::Left
        } else if right_closed {
            MouseButton::Right
        } else {
            return EyeGesture::Idle;
        };

        timers.last_click_time = Some(t);
        EyeGesture::Click(button)
    }
}
