//! Linux pointer backends.
//!
//! The uinput backend creates a virtual absolute pointer whose axes span
//! the whole virtual desktop, so it works the same under X11 and Wayland.

use std::os::unix::fs::MetadataExt;

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{
    AbsInfo, AbsoluteAxisType, AttributeSet, EventType, InputEvent, Key, RelativeAxisType,
    UinputAbsSetup,
};
use facepoint_common::error::{FacepointError, FacepointResult};
use facepoint_face_model::MouseButton;
use facepoint_platform_core::{monitor_to_desktop, DesktopBounds, MonitorInfo};
use facepoint_platform_linux::permissions::{uinput_writable, UINPUT_DEVICE};

use crate::{PointerBackend, StubBackend};

const DEVICE_NAME: &str = "Facepoint Virtual Pointer";

/// The monitor the cursor is mapped onto and the desktop around it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLayout {
    pub monitor: MonitorInfo,
    pub bounds: DesktopBounds,
}

/// Detect monitors once and pick the primary one.
pub fn detect_screen() -> ScreenLayout {
    let monitors = match facepoint_platform_linux::detect_monitors() {
        Ok(monitors) => monitors,
        Err(e) => {
            tracing::warn!(error = %e, "Monitor detection failed");
            Vec::new()
        }
    };

    let monitor = facepoint_platform_core::primary_monitor(&monitors)
        .cloned()
        .unwrap_or_else(|| MonitorInfo::single(1920, 1080));
    let bounds = facepoint_platform_core::virtual_desktop_bounds(&monitors);

    tracing::info!(
        monitor = %monitor.name,
        width = monitor.width,
        height = monitor.height,
        desktop_width = bounds.width,
        desktop_height = bounds.height,
        "Screen detected"
    );
    ScreenLayout { monitor, bounds }
}

pub struct UinputBackend {
    device: VirtualDevice,
    layout: ScreenLayout,
}

impl UinputBackend {
    pub fn new(layout: ScreenLayout) -> FacepointResult<Self> {
        let device = build_device(&layout.bounds).map_err(|e| {
            FacepointError::pointer(format!("Failed to create uinput device: {e}"))
        })?;

        tracing::debug!(name = DEVICE_NAME, "Virtual pointer created");
        Ok(Self { device, layout })
    }

    pub fn is_supported() -> bool {
        uinput_writable()
    }

    fn emit(&mut self, events: &[InputEvent]) -> FacepointResult<()> {
        // emit() appends the SYN_REPORT itself.
        self.device
            .emit(events)
            .map_err(|e| FacepointError::pointer(format!("uinput write failed: {e}")))
    }
}

fn build_device(bounds: &DesktopBounds) -> std::io::Result<VirtualDevice> {
    let mut keys = AttributeSet::<Key>::new();
    keys.insert(Key::BTN_LEFT);
    keys.insert(Key::BTN_RIGHT);

    let mut wheel = AttributeSet::<RelativeAxisType>::new();
    wheel.insert(RelativeAxisType::REL_WHEEL);

    let max_x = bounds.width.saturating_sub(1) as i32;
    let max_y = bounds.height.saturating_sub(1) as i32;
    let abs_x = UinputAbsSetup::new(AbsoluteAxisType::ABS_X, AbsInfo::new(0, 0, max_x, 0, 0, 0));
    let abs_y = UinputAbsSetup::new(AbsoluteAxisType::ABS_Y, AbsInfo::new(0, 0, max_y, 0, 0, 0));

    VirtualDeviceBuilder::new()?
        .name(DEVICE_NAME)
        .with_keys(&keys)?
        .with_relative_axes(&wheel)?
        .with_absolute_axis(&abs_x)?
        .with_absolute_axis(&abs_y)?
        .build()
}

fn button_key(button: MouseButton) -> Key {
    match button {
        MouseButton::Left => Key::BTN_LEFT,
        MouseButton::Right => Key::BTN_RIGHT,
    }
}

/// Wheel clicks for a scroll amount. One notch per 40 units, at least one.
fn wheel_notches(delta: i32) -> i32 {
    if delta == 0 {
        return 0;
    }
    let notches = (delta / 40).abs().max(1);
    notches * delta.signum()
}

impl PointerBackend for UinputBackend {
    fn move_to(&mut self, x: i32, y: i32) -> FacepointResult<()> {
        let (dx, dy) = monitor_to_desktop(x, y, &self.layout.monitor, &self.layout.bounds);
        self.emit(&[
            InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisType::ABS_X.0, dx),
            InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisType::ABS_Y.0, dy),
        ])
    }

    fn click(&mut self, button: MouseButton) -> FacepointResult<()> {
        let code = button_key(button).code();
        self.emit(&[InputEvent::new(EventType::KEY, code, 1)])?;
        self.emit(&[InputEvent::new(EventType::KEY, code, 0)])
    }

    fn scroll(&mut self, delta: i32) -> FacepointResult<()> {
        let notches = wheel_notches(delta);
        if notches == 0 {
            return Ok(());
        }
        self.emit(&[InputEvent::new(
            EventType::RELATIVE,
            RelativeAxisType::REL_WHEEL.0,
            notches,
        )])
    }

    fn name(&self) -> &str {
        "uinput"
    }
}

/// Detect the best available pointer backend for the current system.
pub fn detect_best_backend(layout: ScreenLayout) -> Box<dyn PointerBackend> {
    if UinputBackend::is_supported() {
        match UinputBackend::new(layout) {
            Ok(backend) => {
                tracing::info!("Using uinput pointer backend");
                return Box::new(backend);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to initialize uinput backend, using stub");
            }
        }
    }

    tracing::warn!(
        details = %uinput_diagnostic(),
        "Using stub pointer backend; cursor, clicks and scrolls will not reach the desktop"
    );
    Box::new(StubBackend::new())
}

fn uinput_diagnostic() -> String {
    let uid = unsafe { libc::geteuid() };
    let gid = unsafe { libc::getegid() };

    match std::fs::metadata(UINPUT_DEVICE) {
        Ok(meta) => {
            let mode = meta.mode() & 0o777;
            format!(
                "device={UINPUT_DEVICE} mode={mode:o} owner_uid={} owner_gid={} process_uid={uid} process_gid={gid}; likely missing write access. Fix: sudo usermod -aG input $USER plus a udev rule for uinput, then log out/in",
                meta.uid(),
                meta.gid()
            )
        }
        Err(err) => format!(
            "device={UINPUT_DEVICE} unavailable ({err}); load the module with: sudo modprobe uinput"
        ),
    }
}
