//! Permission detection and guidance for Linux.
//!
//! Facepoint injects pointer events through a uinput virtual device and
//! needs a graphical session for the cursor to land somewhere visible.

use std::ffi::CString;
use std::path::Path;

/// Kernel device used to create the virtual pointer.
pub const UINPUT_DEVICE: &str = "/dev/uinput";

/// A system capability that Facepoint may need.
#[derive(Debug, Clone)]
pub struct Capability {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub required: bool,
    pub fix_instructions: Option<String>,
}

/// Check all capabilities and report status.
pub fn check_capabilities() -> Vec<Capability> {
    vec![
        check_graphical_session(),
        check_uinput_access(),
        check_webcam_access(),
    ]
}

/// Whether the current process can open `/dev/uinput` for writing.
pub fn uinput_writable() -> bool {
    can_access(UINPUT_DEVICE, libc::W_OK)
}

fn can_access(path: &str, mode: libc::c_int) -> bool {
    let Ok(c_path) = CString::new(path) else {
        return false;
    };
    unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
}

/// Check for a display server to move the cursor on.
fn check_graphical_session() -> Capability {
    let available = std::env::var("WAYLAND_DISPLAY").is_ok() || std::env::var("DISPLAY").is_ok();

    Capability {
        name: "Graphical Session".to_string(),
        description: "Wayland or X11 session receiving pointer input".to_string(),
        available,
        required: true,
        fix_instructions: if !available {
            Some(
                "Run from a graphical desktop session (GNOME, KDE, etc.)".to_string(),
            )
        } else {
            None
        },
    }
}

/// Check if the user can create virtual input devices.
fn check_uinput_access() -> Capability {
    let exists = Path::new(UINPUT_DEVICE).exists();
    let writable = exists && uinput_writable();

    Capability {
        name: "Virtual Pointer (uinput)".to_string(),
        description: "Write access to /dev/uinput for cursor, click, and scroll injection"
            .to_string(),
        available: writable,
        required: true,
        fix_instructions: if !exists {
            Some("Load the uinput module: sudo modprobe uinput".to_string())
        } else if !writable {
            Some(
                "Grant access: sudo usermod -aG input $USER and add a udev rule \
                 KERNEL==\"uinput\", GROUP=\"input\", MODE=\"0660\" (logout required)"
                    .to_string(),
            )
        } else {
            None
        },
    }
}

/// Check if a webcam device is available for the landmark tracker.
fn check_webcam_access() -> Capability {
    let has_webcam = (0..16)
        .map(|idx| format!("/dev/video{idx}"))
        .any(|path| Path::new(&path).exists());

    Capability {
        name: "Webcam Device".to_string(),
        description: "Video4Linux camera feeding the external landmark tracker".to_string(),
        available: has_webcam,
        required: false,
        fix_instructions: if has_webcam {
            None
        } else {
            Some(
                "Connect a webcam and verify /dev/video* exists (v4l2-ctl --list-devices)"
                    .to_string(),
            )
        },
    }
}

/// Print a user-friendly capability report.
pub fn print_capability_report(capabilities: &[Capability]) {
    println!("Facepoint System Capabilities:");
    println!("{}", "-".repeat(60));

    for cap in capabilities {
        let status = if cap.available {
            "[OK]"
        } else if cap.required {
            "[MISSING - REQUIRED]"
        } else {
            "[MISSING - OPTIONAL]"
        };

        println!("  {} {}: {}", status, cap.name, cap.description);

        if let Some(ref fix) = cap.fix_instructions {
            println!("    Fix: {fix}");
        }
    }
}
