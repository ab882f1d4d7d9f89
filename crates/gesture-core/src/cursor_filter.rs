//! Nose-driven cursor positioning.
//!
//! The nose tip is mapped from a central input band of the camera frame
//! onto the full screen, then passed through a one-pole exponential
//! filter to remove tracking jitter.

use serde::{Deserialize, Serialize};

use facepoint_common::config::{CursorConfig, InputBand};
use facepoint_face_model::{Action, Landmark};

/// Screen area the cursor is mapped onto, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Last emitted smoothed cursor position, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CursorState {
    pub x: f64,
    pub y: f64,
}

/// Maps nose positions to smoothed screen coordinates.
///
/// The filter itself is stateless; the smoothed position lives in a
/// [`CursorState`] owned by the caller.
#[derive(Debug, Clone)]
pub struct CursorFilter {
    band: InputBand,
    smooth_factor: f64,
    screen: ScreenSize,
}

impl CursorFilter {
    pub fn new(config: &CursorConfig, screen: ScreenSize) -> Self {
        Self {
            band: config.input_band,
            smooth_factor: config.smooth_factor.clamp(0.0, 1.0),
            screen,
        }
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Unsmoothed screen target for a nose position.
    pub fn target(&self, nose: &Landmark) -> (f64, f64) {
        (
            interp(nose.x, self.band, self.screen.width as f64),
            interp(nose.y, self.band, self.screen.height as f64),
        )
    }

    /// Advance the filter one frame toward the nose target and persist
    /// the result into `state`.
    pub fn apply(&self, state: &mut CursorState, nose: &Landmark) -> Action {
        let (target_x, target_y) = self.target(nose);
        let gain = 1.0 - self.smooth_factor;

        state.x += (target_x - state.x) * gain;
        state.y += (target_y - state.y) * gain;

        Action::MoveCursor {
            x: state.x,
            y: state.y,
        }
    }
}

/// Linear map of `value` from `band` onto `[0, extent]`, clamped at both ends.
fn interp(value: f64, band: InputBand, extent: f64) -> f64 {
    if value <= band.min {
        return 0.0;
    }
    if value >= band.max {
        return extent;
    }
    (value - band.min) / (band.max - band.min) * extent
}
