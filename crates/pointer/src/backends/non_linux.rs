//! Pointer backends for platforms without a native implementation.

use facepoint_platform_core::{virtual_desktop_bounds, DesktopBounds, MonitorInfo};

use crate::{PointerBackend, StubBackend};

/// The monitor the cursor is mapped onto and the desktop around it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLayout {
    pub monitor: MonitorInfo,
    pub bounds: DesktopBounds,
}

pub fn detect_screen() -> ScreenLayout {
    let monitor = MonitorInfo::single(1920, 1080);
    let bounds = virtual_desktop_bounds(std::slice::from_ref(&monitor));
    tracing::warn!("Monitor detection is not implemented for this platform; assuming 1920x1080");
    ScreenLayout { monitor, bounds }
}

pub fn detect_best_backend(_layout: ScreenLayout) -> Box<dyn PointerBackend> {
    tracing::warn!(
        "Pointer backends for this platform are not implemented yet; using stub backend"
    );
    Box::new(StubBackend::new())
}
