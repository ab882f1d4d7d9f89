//! Facepoint platform core contracts.
//!
//! Display geometry shared by the platform detection crates and the
//! pointer backends, without coupling to a concrete OS backend.

use serde::{Deserialize, Serialize};

/// Information about a connected monitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorInfo {
    /// Monitor name/identifier.
    pub name: String,
    /// Resolution in physical pixels.
    pub width: u32,
    pub height: u32,
    /// Position in the virtual desktop (pixels).
    pub x: i32,
    pub y: i32,
    /// Refresh rate in Hz, when known.
    pub refresh_rate_hz: Option<u32>,
    /// Whether this monitor is primary.
    pub primary: bool,
}

impl MonitorInfo {
    /// A single primary monitor at the desktop origin.
    pub fn single(width: u32, height: u32) -> Self {
        Self {
            name: "default".to_string(),
            width,
            height,
            x: 0,
            y: 0,
            refresh_rate_hz: None,
            primary: true,
        }
    }
}

/// Display server / platform family the pointer is injected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayServer {
    Wayland,
    X11,
    #[default]
    Unknown,
}

/// Axis-aligned desktop rectangle in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// The monitor the cursor is mapped onto: the primary one, else the first.
pub fn primary_monitor(monitors: &[MonitorInfo]) -> Option<&MonitorInfo> {
    monitors
        .iter()
        .find(|m| m.primary)
        .or_else(|| monitors.first())
}

/// Compute virtual desktop bounds that include all connected monitors.
pub fn virtual_desktop_bounds(monitors: &[MonitorInfo]) -> DesktopBounds {
    if monitors.is_empty() {
        return DesktopBounds {
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
        };
    }

    let min_x = monitors.iter().map(|m| m.x).min().unwrap_or(0);
    let min_y = monitors.iter().map(|m| m.y).min().unwrap_or(0);
    let max_x = monitors
        .iter()
        .map(|m| m.x + m.width as i32)
        .max()
        .unwrap_or(1920);
    let max_y = monitors
        .iter()
        .map(|m| m.y + m.height as i32)
        .max()
        .unwrap_or(1080);

    DesktopBounds {
        x: min_x,
        y: min_y,
        width: (max_x - min_x).max(1) as u32,
        height: (max_y - min_y).max(1) as u32,
    }
}

/// Translate a pixel on `monitor` into an offset from the top-left of
/// `bounds`, clamped to the desktop.
pub fn monitor_to_desktop(
    px: i32,
    py: i32,
    monitor: &MonitorInfo,
    bounds: &DesktopBounds,
) -> (i32, i32) {
    let x = (monitor.x + px - bounds.x).clamp(0, bounds.width.saturating_sub(1) as i32);
    let y = (monitor.y + py - bounds.y).clamp(0, bounds.height.saturating_sub(1) as i32);
    (x, y)
}
