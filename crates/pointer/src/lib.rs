//! Facepoint Pointer
//!
//! Turns emitted [`Action`]s into real pointer input. Uses a pluggable
//! backend architecture:
//!
//! - **Uinput:** Virtual absolute pointer device (Linux, needs `/dev/uinput`)
//! - **Stub:** Records calls in memory (tests, dry runs)
//!
//! The dispatcher can also append every action to a JSONL log.

#[cfg(target_os = "linux")]
pub mod backends;
#[cfg(not(target_os = "linux"))]
#[path = "backends/non_linux.rs"]
pub mod backends;
pub mod stub;
pub mod writer;

pub use stub::{PointerCall, StubBackend, StubRecorder};
pub use writer::ActionWriter;

use facepoint_common::config::DispatchConfig;
use facepoint_common::error::{FacepointError, FacepointResult};
use facepoint_face_model::{Action, MouseButton};

/// Trait for pointer injection backends.
///
/// Coordinates are whole pixels on the mapped screen, origin top-left.
pub trait PointerBackend: Send {
    fn move_to(&mut self, x: i32, y: i32) -> FacepointResult<()>;

    fn click(&mut self, button: MouseButton) -> FacepointResult<()>;

    /// Wheel impulse. Negative scrolls down.
    fn scroll(&mut self, delta: i32) -> FacepointResult<()>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Counters kept by the dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub moves: u64,
    pub clicks: u64,
    pub scrolls: u64,
    pub backend_errors: u64,
}

/// Executes a frame's actions against a backend, in emission order.
pub struct ActionDispatcher {
    backend: Box<dyn PointerBackend>,
    writer: Option<ActionWriter>,
    screen_width: u32,
    screen_height: u32,
    failsafe: bool,
    stats: DispatchStats,
}

impl ActionDispatcher {
    pub fn new(
        backend: Box<dyn PointerBackend>,
        screen_width: u32,
        screen_height: u32,
        config: &DispatchConfig,
    ) -> Self {
        Self {
            backend,
            writer: None,
            screen_width: screen_width.max(1),
            screen_height: screen_height.max(1),
            failsafe: config.failsafe,
            stats: DispatchStats::default(),
        }
    }

    /// Also append every dispatched action to `writer`.
    pub fn with_writer(mut self, writer: ActionWriter) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Dispatch the actions of the frame at time `t`.
    ///
    /// Backend failures are logged and counted, never returned. Errors
    /// come only from the action log and the fail-safe guard.
    pub fn dispatch(&mut self, t: f64, actions: &[Action]) -> FacepointResult<()> {
        for action in actions {
            if let Some(writer) = self.writer.as_mut() {
                writer.write_action(t, action)?;
            }

            let result = match *action {
                Action::MoveCursor { x, y } => {
                    let (px, py) = self.to_pixels(x, y);
                    self.stats.moves += 1;
                    if self.failsafe && is_failsafe_point(px, py) {
                        tracing::warn!(x = px, y = py, "Cursor reached the fail-safe corner");
                        return Err(FacepointError::FailSafe { x: px, y: py });
                    }
                    self.backend.move_to(px, py)
                }
                Action::Click { button } => {
                    self.stats.clicks += 1;
                    tracing::info!(?button, t, "Click");
                    self.backend.click(button)
                }
                Action::Scroll { delta } => {
                    self.stats.scrolls += 1;
                    tracing::debug!(delta, t, "Scroll");
                    self.backend.scroll(delta)
                }
                Action::Shutdown => {
                    tracing::info!(t, "Shutdown gesture completed");
                    Ok(())
                }
            };

            if let Err(e) = result {
                self.stats.backend_errors += 1;
                tracing::warn!(
                    backend = %self.backend.name(),
                    error = %e,
                    ?action,
                    "Pointer backend failed"
                );
            }
        }
        Ok(())
    }

    /// Flush the action log, if any.
    pub fn finish(&mut self) -> FacepointResult<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
            tracing::info!(
                path = %writer.path().display(),
                actions = writer.actions_written(),
                "Action log written"
            );
        }
        Ok(())
    }

    fn to_pixels(&self, x: f64, y: f64) -> (i32, i32) {
        let max_x = self.screen_width as i32 - 1;
        let max_y = self.screen_height as i32 - 1;
        let px = (x.round() as i32).clamp(0, max_x);
        let py = (y.round() as i32).clamp(0, max_y);
        (px, py)
    }
}

/// Only the top-left pixel trips the fail-safe. The other corners stay
/// reachable for panels and trays.
fn is_failsafe_point(px: i32, py: i32) -> bool {
    px == 0 && py == 0
}
